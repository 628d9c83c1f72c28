use crate::surface::SurfaceSize;

use super::Uniforms;

/// The one draw issued per frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawCall {
    /// `draw_indexed(0..index_count)` with a `u32` index buffer.
    Indexed { index_count: u32 },
    /// `draw(0..vertex_count)`.
    NonIndexed { vertex_count: u32 },
}

/// Everything a renderer needs to produce one frame.
#[derive(Debug, Copy, Clone)]
pub struct FramePlan {
    pub size: SurfaceSize,
    pub uniforms: Uniforms,
    pub draw: DrawCall,
}

/// Result of rendering one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Presented,
    /// Transient surface condition; try again next frame.
    Skipped,
    /// Unrecoverable; the frame loop stops.
    Lost,
}

/// Consumer of frame plans (the GPU side of the frame driver).
pub trait FrameRenderer {
    /// Resizes the presentation surface. Called every frame; implementations
    /// reconfigure only when the pixel size actually changed.
    fn resize(&mut self, size: SurfaceSize);

    /// Uploads the plan's uniforms, draws, submits and presents.
    fn render(&mut self, plan: &FramePlan) -> FrameStatus;
}
