use glam::Mat4;

use crate::config::CameraConfig;

/// Perspective projection for the given aspect ratio (width / height).
pub fn perspective(camera: &CameraConfig, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(camera.fov_y, aspect, camera.near, camera.far)
}

/// Mutable transform state carried from frame to frame.
///
/// `model_view_projection` is a single slot overwritten every frame; no history
/// is kept.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub projection: Mat4,
    pub model_view_projection: Mat4,
}

impl Transform {
    pub fn new(projection: Mat4) -> Self {
        Self {
            projection,
            model_view_projection: projection,
        }
    }

    /// Replaces the projection for a new aspect ratio.
    pub fn set_aspect(&mut self, camera: &CameraConfig, aspect: f32) {
        self.projection = perspective(camera, aspect);
    }

    /// Combines `projection * view` into the model-view-projection slot.
    pub fn update(&mut self, view: Mat4) -> Mat4 {
        self.model_view_projection = self.projection * view;
        self.model_view_projection
    }
}
