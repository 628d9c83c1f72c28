//! GPU device + surface management.
//!
//! This module is responsible for:
//! - acquiring the wgpu Adapter/Device/Queue (the only place GPU availability is decided)
//! - configuring the presentation surface
//! - owning every GPU resource the backdrop draws with (`RenderContext`)

mod context;
mod init;
mod surface;

pub use context::{PassTemplate, RenderContext};
pub use init::{acquire, Acquired};
pub use surface::SurfaceErrorAction;
