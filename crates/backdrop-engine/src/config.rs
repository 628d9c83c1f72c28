//! Backdrop configuration.
//!
//! Plain structs with `Default`; there is no file or environment layer. Hosts
//! build a `BackdropConfig::default()` and override fields where needed.

use std::borrow::Cow;
use std::f32::consts::PI;

/// Top-level configuration handed to `mount`.
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    pub camera: CameraConfig,
    pub device: DeviceInit,
    pub shaders: ShaderSet,

    /// Clear color for every frame (premultiplied RGBA).
    ///
    /// Transparent black lets the page show through everywhere the mesh is not.
    pub clear_color: [f64; 4],
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            device: DeviceInit::default(),
            shaders: ShaderSet::default(),
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

/// Projection and tumbling camera parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    /// Distance the camera is pulled back along -Z.
    pub distance: f32,

    /// Fixed rotation angle (radians) about the precessing axis.
    pub tumble_angle: f32,

    /// Wall-clock milliseconds per radian of axis precession.
    pub tumble_period_ms: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y: 2.0 * PI / 5.0,
            near: 1.0,
            far: 100.0,
            distance: 5.0,
            tumble_angle: 1.0,
            tumble_period_ms: 2000.0,
        }
    }
}

/// Device capability tier requested from the adapter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FeatureTier {
    /// Broadest device support: downlevel limits, no power preference.
    #[default]
    Compatibility,
    /// Full default limits on a high-performance adapter.
    Core,
}

impl FeatureTier {
    pub fn power_preference(self) -> wgpu::PowerPreference {
        match self {
            FeatureTier::Compatibility => wgpu::PowerPreference::None,
            FeatureTier::Core => wgpu::PowerPreference::HighPerformance,
        }
    }

    /// Limits to request, keeping the adapter's texture size so large canvases fit.
    pub fn limits(self, adapter: &wgpu::Limits) -> wgpu::Limits {
        let base = match self {
            FeatureTier::Compatibility => wgpu::Limits::downlevel_webgl2_defaults(),
            FeatureTier::Core => wgpu::Limits::default(),
        };
        base.using_resolution(adapter.clone())
    }
}

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct DeviceInit {
    /// Backends the wgpu instance may use.
    pub backends: wgpu::Backends,

    pub feature_tier: FeatureTier,

    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: the backend's preferred format (first reported) is used,
    /// which is what browsers hand out for canvases.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference for the surface.
    ///
    /// Premultiplied so the mesh composites over the page. If unsupported, a
    /// supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Desired maximum frame latency for the surface (hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for DeviceInit {
    fn default() -> Self {
        Self {
            backends: default_backends(),
            feature_tier: FeatureTier::Compatibility,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PreMultiplied),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::BROWSER_WEBGPU
}

#[cfg(not(target_arch = "wasm32"))]
fn default_backends() -> wgpu::Backends {
    wgpu::Backends::all()
}

/// WGSL sources for the two pipeline stages.
///
/// Both stages must declare the uniform block at `@group(0) @binding(0)` with the
/// layout in [`crate::render::Uniforms`]. Entry points are `vs_main` and `fs_main`.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl Default for ShaderSet {
    fn default() -> Self {
        Self {
            vertex: Cow::Borrowed(include_str!("render/shaders/mesh.vert.wgsl")),
            fragment: Cow::Borrowed(include_str!("render/shaders/mesh.frag.wgsl")),
        }
    }
}
