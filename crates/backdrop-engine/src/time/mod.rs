//! Time subsystem.
//!
//! Two clocks feed a frame:
//! - the wall clock (`wall_clock_ms`) drives the camera tumble phase
//! - a frame timestamp (scheduler supplied, or `FrameClock` for hosts without one)
//!   is forwarded to the shaders through the uniform trailer

mod frame_clock;
mod wall;

pub use frame_clock::{FrameClock, FrameTime};
pub use wall::wall_clock_ms;
