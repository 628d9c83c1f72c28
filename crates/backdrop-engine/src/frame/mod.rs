//! Frame driver.
//!
//! `FrameDriver::step` performs one animation step (resize, camera, uniforms,
//! draw). `FrameLoop` turns steps into a display-paced loop by running one step
//! and then asking the host for the next frame; nothing recurses.

mod driver;
mod run_loop;

pub use driver::FrameDriver;
pub use run_loop::{FrameLoop, LoopHandle};
