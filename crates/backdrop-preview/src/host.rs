use std::cell::{Cell, RefCell};
use std::sync::Arc;

use backdrop_engine::surface::{Layout, SurfaceSize};
use backdrop_engine::time::FrameClock;
use backdrop_engine::{FrameCallback, Host, SurfaceProvider};
use winit::window::Window;

/// Desktop window acting as the backdrop surface.
///
/// Frames are paced by winit redraws: `request_frame` parks the callback and
/// asks for a redraw, `RedrawRequested` runs it via [`WindowHost::run_pending`].
pub struct WindowHost {
    window: Arc<Window>,
    title: String,
    claimed: Cell<bool>,
    pending: RefCell<Option<FrameCallback>>,
    clock: RefCell<FrameClock>,
}

impl WindowHost {
    pub fn new(window: Arc<Window>, title: String) -> Self {
        Self {
            window,
            title,
            claimed: Cell::new(false),
            pending: RefCell::new(None),
            clock: RefCell::new(FrameClock::new()),
        }
    }

    /// Runs the parked frame callback, if any.
    pub fn run_pending(&self) {
        let Some(callback) = self.pending.borrow_mut().take() else {
            return;
        };
        let timestamp_ms = self.clock.borrow_mut().tick().timestamp_ms;

        self.window.pre_present_notify();
        callback(timestamp_ms);
    }
}

impl Host for WindowHost {
    fn claim(&self) -> bool {
        !self.claimed.replace(true)
    }

    fn layout(&self) -> Layout {
        let phys = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logical: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        Layout::new(logical.width, logical.height, scale)
    }

    fn apply_size(&self, _size: SurfaceSize) {
        // The window manager owns the window size; its inner size already is the
        // backing size.
    }

    fn show_unavailable(&self) {
        self.window
            .set_title(&format!("{} (GPU acceleration unavailable)", self.title));
    }

    fn request_frame(&self, callback: FrameCallback) {
        *self.pending.borrow_mut() = Some(callback);
        self.window.request_redraw();
    }
}

impl SurfaceProvider for WindowHost {
    fn surface_target(&self) -> wgpu::SurfaceTarget<'static> {
        wgpu::SurfaceTarget::from(Arc::clone(&self.window))
    }
}
