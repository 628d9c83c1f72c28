use crate::camera::{self, Transform};
use crate::config::CameraConfig;
use crate::host::Host;
use crate::render::{DrawCall, FramePlan, FrameRenderer, FrameStatus, Uniforms};
use crate::surface::SurfaceSize;

/// Per-frame state: the renderer's GPU handles plus the mutable transform.
pub struct FrameDriver<R> {
    renderer: R,
    transform: Transform,
    camera: CameraConfig,
    draw: DrawCall,
}

impl<R: FrameRenderer> FrameDriver<R> {
    pub fn new(renderer: R, transform: Transform, camera: CameraConfig, draw: DrawCall) -> Self {
        Self {
            renderer,
            transform,
            camera,
            draw,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds the plan for one frame and updates the transform.
    ///
    /// Returns `None` when the layout is collapsed to zero area.
    pub fn plan(&mut self, size: SurfaceSize, timestamp_ms: f64, wall_clock_ms: f64) -> Option<FramePlan> {
        if size.is_empty() {
            return None;
        }

        self.transform.set_aspect(&self.camera, size.aspect());

        let phase = camera::tumble_phase(wall_clock_ms, self.camera.tumble_period_ms);
        let view = camera::view_matrix(&self.camera, phase);
        let model_view_projection = self.transform.update(view);

        Some(FramePlan {
            size,
            uniforms: Uniforms::new(model_view_projection, timestamp_ms, size.pixel_ratio),
            draw: self.draw,
        })
    }

    /// One animation step against `host`.
    pub fn step<H: Host + ?Sized>(&mut self, host: &H, timestamp_ms: f64) -> FrameStatus {
        let size = SurfaceSize::from_layout(host.layout());
        host.apply_size(size);
        self.renderer.resize(size);

        match self.plan(size, timestamp_ms, host.wall_clock_ms()) {
            Some(plan) => self.renderer.render(&plan),
            None => FrameStatus::Skipped,
        }
    }
}
