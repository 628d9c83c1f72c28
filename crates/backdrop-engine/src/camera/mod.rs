//! Camera math.
//!
//! Pure functions from (config, aspect, wall clock) to matrices. Nothing here
//! touches the GPU, so every property is unit-testable.
//!
//! Conventions:
//! - right-handed view space, camera looking down -Z
//! - clip-space depth in [0, 1] (WebGPU / wgpu)

mod projection;
mod tumble;

pub use projection::{perspective, Transform};
pub use tumble::{tumble_axis, tumble_phase, view_matrix};
