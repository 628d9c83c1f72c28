//! Mount entry point.
//!
//! `mount` claims a surface, acquires a GPU through a [`Backend`], builds the
//! render context and starts the frame loop. When no GPU is available it reveals
//! the host's fallback notice instead and never schedules a frame.

use std::future::Future;
use std::rc::Rc;

use anyhow::Result;

use crate::camera::{self, Transform};
use crate::config::BackdropConfig;
use crate::device::{self, Acquired, RenderContext};
use crate::frame::{FrameDriver, FrameLoop, LoopHandle};
use crate::geometry::Geometry;
use crate::host::{Host, SurfaceProvider};
use crate::render::FrameRenderer;
use crate::surface::SurfaceSize;

/// GPU backend seam: acquisition (may yield nothing) and context construction.
pub trait Backend<H: Host> {
    /// Acquired adapter/device handles.
    type Device;
    type Renderer: FrameRenderer + 'static;

    /// The single GPU-unavailability detection point. `None` is terminal.
    fn acquire(&self, host: &H, config: &BackdropConfig) -> impl Future<Output = Option<Self::Device>>;

    /// Creates surface configuration, buffers, pipeline and bindings.
    fn build(
        &self,
        device: Self::Device,
        geometry: &Geometry<'_>,
        config: &BackdropConfig,
        size: SurfaceSize,
    ) -> Result<Self::Renderer>;
}

/// Production backend on wgpu.
#[derive(Debug, Default, Copy, Clone)]
pub struct WgpuBackend;

impl<H: Host + SurfaceProvider> Backend<H> for WgpuBackend {
    type Device = Acquired;
    type Renderer = RenderContext;

    async fn acquire(&self, host: &H, config: &BackdropConfig) -> Option<Acquired> {
        device::acquire(&config.device, host.surface_target()).await
    }

    fn build(
        &self,
        device: Acquired,
        geometry: &Geometry<'_>,
        config: &BackdropConfig,
        size: SurfaceSize,
    ) -> Result<RenderContext> {
        RenderContext::new(device, geometry, config, size)
    }
}

/// What `mount` ended up doing.
#[derive(Debug)]
pub enum MountOutcome {
    /// Setup succeeded; the frame loop is scheduled.
    Running(LoopHandle),
    /// No usable GPU; the fallback notice is shown.
    Unavailable,
    /// The surface was already mounted; nothing was done.
    AlreadyStarted,
}

impl MountOutcome {
    pub fn is_running(&self) -> bool {
        matches!(self, MountOutcome::Running(_))
    }
}

/// Starts the backdrop on `host`.
///
/// Safe to call more than once per surface: only the first call does any work.
pub async fn mount<H, B>(
    host: Rc<H>,
    backend: &B,
    geometry: &Geometry<'_>,
    config: &BackdropConfig,
) -> MountOutcome
where
    H: Host + 'static,
    B: Backend<H>,
{
    if !host.claim() {
        log::debug!("backdrop already mounted on this surface");
        return MountOutcome::AlreadyStarted;
    }

    let Some(device) = backend.acquire(&*host, config).await else {
        log::warn!("GPU acceleration unavailable; showing fallback notice");
        host.show_unavailable();
        return MountOutcome::Unavailable;
    };

    let size = SurfaceSize::from_layout(host.layout());
    host.apply_size(size);

    let renderer = match backend.build(device, geometry, config, size) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("backdrop setup failed: {e:#}");
            host.show_unavailable();
            return MountOutcome::Unavailable;
        }
    };

    let aspect = if size.is_empty() { 1.0 } else { size.aspect() };
    let transform = Transform::new(camera::perspective(&config.camera, aspect));
    let driver = FrameDriver::new(renderer, transform, config.camera, geometry.draw_call());

    log::info!(
        "backdrop running at {}x{} (pixel ratio {})",
        size.width,
        size.height,
        size.pixel_ratio
    );

    MountOutcome::Running(FrameLoop::start(host, driver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    use crate::geometry::{VertexLayout, CUBE};
    use crate::host::FrameCallback;
    use crate::render::{DrawCall, FramePlan, FrameStatus};
    use crate::surface::Layout;

    // ── stubs ─────────────────────────────────────────────────────────────

    struct StubHost {
        layout: Layout,
        claimed: Cell<bool>,
        notice_visible: Cell<bool>,
        applied: RefCell<Vec<SurfaceSize>>,
        pending: RefCell<Vec<FrameCallback>>,
    }

    impl StubHost {
        fn new(layout: Layout) -> Rc<Self> {
            Rc::new(Self {
                layout,
                claimed: Cell::new(false),
                notice_visible: Cell::new(false),
                applied: RefCell::new(Vec::new()),
                pending: RefCell::new(Vec::new()),
            })
        }

        fn pump(&self, timestamp_ms: f64) {
            let next = self.pending.borrow_mut().pop();
            if let Some(callback) = next {
                callback(timestamp_ms);
            }
        }
    }

    impl Host for StubHost {
        fn claim(&self) -> bool {
            !self.claimed.replace(true)
        }
        fn layout(&self) -> Layout {
            self.layout
        }
        fn apply_size(&self, size: SurfaceSize) {
            self.applied.borrow_mut().push(size);
        }
        fn show_unavailable(&self) {
            self.notice_visible.set(true);
        }
        fn request_frame(&self, callback: FrameCallback) {
            self.pending.borrow_mut().push(callback);
        }
    }

    type DrawLog = Rc<RefCell<Vec<DrawCall>>>;

    struct LoggingRenderer {
        draws: DrawLog,
    }

    impl FrameRenderer for LoggingRenderer {
        fn resize(&mut self, _size: SurfaceSize) {}
        fn render(&mut self, plan: &FramePlan) -> FrameStatus {
            self.draws.borrow_mut().push(plan.draw);
            FrameStatus::Presented
        }
    }

    struct StubBackend {
        has_device: bool,
        build_fails: bool,
        acquires: Cell<u32>,
        builds: Cell<u32>,
        draws: DrawLog,
    }

    impl StubBackend {
        fn new(has_device: bool) -> Self {
            Self {
                has_device,
                build_fails: false,
                acquires: Cell::new(0),
                builds: Cell::new(0),
                draws: Rc::default(),
            }
        }
    }

    impl Backend<StubHost> for StubBackend {
        type Device = ();
        type Renderer = LoggingRenderer;

        async fn acquire(&self, _host: &StubHost, _config: &BackdropConfig) -> Option<()> {
            self.acquires.set(self.acquires.get() + 1);
            self.has_device.then_some(())
        }

        fn build(
            &self,
            _device: (),
            _geometry: &Geometry<'_>,
            _config: &BackdropConfig,
            _size: SurfaceSize,
        ) -> Result<LoggingRenderer> {
            self.builds.set(self.builds.get() + 1);
            anyhow::ensure!(!self.build_fails, "no supported surface formats");
            Ok(LoggingRenderer {
                draws: Rc::clone(&self.draws),
            })
        }
    }

    fn run(host: &Rc<StubHost>, backend: &StubBackend, geometry: &Geometry<'_>) -> MountOutcome {
        pollster::block_on(mount(
            Rc::clone(host),
            backend,
            geometry,
            &BackdropConfig::default(),
        ))
    }

    // ── availability ──────────────────────────────────────────────────────

    #[test]
    fn missing_device_shows_notice_and_schedules_nothing() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(false);

        let outcome = run(&host, &backend, &CUBE);

        assert!(matches!(outcome, MountOutcome::Unavailable));
        assert!(host.notice_visible.get());
        assert!(host.pending.borrow().is_empty());
        assert_eq!(backend.builds.get(), 0);
        assert!(host.applied.borrow().is_empty());
    }

    #[test]
    fn build_failure_is_treated_as_unavailable() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend {
            build_fails: true,
            ..StubBackend::new(true)
        };

        let outcome = run(&host, &backend, &CUBE);

        assert!(matches!(outcome, MountOutcome::Unavailable));
        assert!(host.notice_visible.get());
        assert!(host.pending.borrow().is_empty());
    }

    #[test]
    fn successful_mount_keeps_notice_hidden() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(true);

        let outcome = run(&host, &backend, &CUBE);

        assert!(outcome.is_running());
        assert!(!host.notice_visible.get());
        assert_eq!(host.pending.borrow().len(), 1);
    }

    // ── idempotence ───────────────────────────────────────────────────────

    #[test]
    fn second_mount_on_same_surface_is_a_no_op() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(true);

        let first = run(&host, &backend, &CUBE);
        let second = run(&host, &backend, &CUBE);

        assert!(first.is_running());
        assert!(matches!(second, MountOutcome::AlreadyStarted));
        assert_eq!(backend.acquires.get(), 1);
        assert_eq!(backend.builds.get(), 1);
        assert_eq!(host.pending.borrow().len(), 1);
    }

    #[test]
    fn unavailable_surface_is_not_retried() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(false);

        run(&host, &backend, &CUBE);
        let again = run(&host, &backend, &CUBE);

        assert!(matches!(again, MountOutcome::AlreadyStarted));
        assert_eq!(backend.acquires.get(), 1);
    }

    // ── end-to-end ────────────────────────────────────────────────────────

    #[test]
    fn mount_sizes_surface_from_layout() {
        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(true);

        run(&host, &backend, &CUBE);

        let applied = host.applied.borrow();
        assert_eq!((applied[0].width, applied[0].height), (800, 600));
        assert!((applied[0].aspect() - 1.333).abs() < 1e-3);
    }

    #[test]
    fn indexed_mesh_issues_one_48_index_draw_per_frame() {
        let vertices = vec![0.0f32; 16 * 6];
        let indices: Vec<u32> = (0..48).map(|i| i % 16).collect();
        let layout = VertexLayout {
            stride: 24,
            position_offset: 0,
            uv_offset: 16,
        };
        let geometry = Geometry::new(&vertices, layout, 16)
            .and_then(|g| g.with_indices(&indices))
            .unwrap();

        let host = StubHost::new(Layout::new(800.0, 600.0, 1.0));
        let backend = StubBackend::new(true);
        let outcome = run(&host, &backend, &geometry);

        for frame in 0..3 {
            host.pump(frame as f64 * 16.7);
        }

        assert!(outcome.is_running());
        assert_eq!(
            *backend.draws.borrow(),
            vec![DrawCall::Indexed { index_count: 48 }; 3]
        );
    }
}
