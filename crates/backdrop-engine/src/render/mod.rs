//! GPU rendering subsystem.
//!
//! Split into host-agnostic data (what one frame needs: uniforms and the draw
//! call) and the wgpu pieces that consume it (pipeline construction).
//!
//! Convention:
//! - one uniform block at `@group(0) @binding(0)`, visible to both stages
//! - one interleaved vertex buffer at slot 0, optional u32 index buffer

mod pipeline;
mod plan;
mod uniforms;

pub use pipeline::{build_pipeline, mesh_blend, mesh_primitive, vertex_attributes};
pub use plan::{DrawCall, FramePlan, FrameRenderer, FrameStatus};
pub use uniforms::{
    UniformWrite, Uniforms, MATRIX_OFFSET, MATRIX_SIZE, TRAILER_OFFSET, TRAILER_WRITE_SIZE,
    UNIFORM_BUFFER_SIZE,
};
