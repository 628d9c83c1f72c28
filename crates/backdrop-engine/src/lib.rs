//! Backdrop engine crate.
//!
//! Renders one animated mesh behind a page (or window) with wgpu. This crate owns
//! the host-agnostic pieces: geometry contract, camera math, uniform layout, the
//! wgpu device/pipeline setup, the frame driver, and the mount entry point with
//! its availability fallback. Platform hosts live in sibling crates.

pub mod camera;
pub mod config;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod host;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
pub mod mount;
pub mod render;
pub mod surface;
pub mod time;

pub use config::BackdropConfig;
pub use geometry::Geometry;
pub use host::{FrameCallback, Host, SurfaceProvider};
pub use mount::{mount, Backend, MountOutcome, WgpuBackend};
