//! Surface sizing.
//!
//! The drawable surface tracks the host layout: CSS (logical) size times the
//! device pixel ratio gives the backing buffer size. Recomputed every frame.

mod sizing;

pub use sizing::{Layout, SurfaceSize};
