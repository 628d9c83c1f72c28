//! Host environment contract.
//!
//! A host is whatever owns the drawable surface: a browser canvas, a desktop
//! window, or a test stub. The engine only reads layout, writes sizes, toggles
//! the fallback notice and asks for the next display frame through this trait.

use crate::surface::{Layout, SurfaceSize};

/// Display-frame callback. Receives the scheduler's frame timestamp in
/// milliseconds (a `DOMHighResTimeStamp` in browsers).
pub type FrameCallback = Box<dyn FnOnce(f64)>;

pub trait Host {
    /// Marks the surface as started.
    ///
    /// Returns `false` when it was already claimed, which makes mounting
    /// idempotent per surface.
    fn claim(&self) -> bool;

    /// Current layout size and device pixel ratio.
    fn layout(&self) -> Layout;

    /// Applies the backing buffer size and the logical (CSS) size to the surface.
    fn apply_size(&self, size: SurfaceSize);

    /// Reveals the "animation unavailable" notice.
    fn show_unavailable(&self);

    /// Runs `callback` once on the next display frame.
    fn request_frame(&self, callback: FrameCallback);

    /// Wall clock in milliseconds since the Unix epoch.
    fn wall_clock_ms(&self) -> f64 {
        crate::time::wall_clock_ms()
    }
}

/// Hosts that can hand wgpu something to present into.
pub trait SurfaceProvider {
    fn surface_target(&self) -> wgpu::SurfaceTarget<'static>;
}
