use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::Host;
use crate::render::{FrameRenderer, FrameStatus};

use super::FrameDriver;

#[derive(Debug)]
struct LoopFlags {
    running: Cell<bool>,
    frames: Cell<u64>,
}

/// Display-paced loop: each callback runs one step, then requests the next frame.
pub struct FrameLoop<H, R> {
    host: Rc<H>,
    driver: RefCell<FrameDriver<R>>,
    flags: Rc<LoopFlags>,
}

impl<H, R> FrameLoop<H, R>
where
    H: Host + 'static,
    R: FrameRenderer + 'static,
{
    /// Schedules the first frame and returns a handle to the running loop.
    ///
    /// The pending host callback keeps the loop alive; dropping the handle does
    /// not stop it.
    pub fn start(host: Rc<H>, driver: FrameDriver<R>) -> LoopHandle {
        let flags = Rc::new(LoopFlags {
            running: Cell::new(true),
            frames: Cell::new(0),
        });

        let this = Rc::new(Self {
            host,
            driver: RefCell::new(driver),
            flags: Rc::clone(&flags),
        });
        this.request_next();

        LoopHandle { flags }
    }

    fn request_next(self: &Rc<Self>) {
        let this = Rc::clone(self);
        self.host
            .request_frame(Box::new(move |timestamp_ms| this.run_step(timestamp_ms)));
    }

    fn run_step(self: &Rc<Self>, timestamp_ms: f64) {
        if !self.flags.running.get() {
            return;
        }

        let status = self.driver.borrow_mut().step(&*self.host, timestamp_ms);
        self.flags.frames.set(self.flags.frames.get() + 1);

        if status == FrameStatus::Lost {
            log::error!("GPU surface lost; backdrop animation stopped");
            self.flags.running.set(false);
            return;
        }

        self.request_next();
    }
}

/// Observes and controls a running [`FrameLoop`].
#[derive(Debug, Clone)]
pub struct LoopHandle {
    flags: Rc<LoopFlags>,
}

impl LoopHandle {
    pub fn is_running(&self) -> bool {
        self.flags.running.get()
    }

    /// Steps executed so far.
    pub fn frames(&self) -> u64 {
        self.flags.frames.get()
    }

    /// Stops the loop; the already-requested frame runs as a no-op.
    pub fn stop(&self) {
        self.flags.running.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::camera::{perspective, Transform};
    use crate::config::CameraConfig;
    use crate::host::FrameCallback;
    use crate::render::{DrawCall, FramePlan};
    use crate::surface::{Layout, SurfaceSize};

    #[derive(Default)]
    struct QueueHost {
        pending: RefCell<Vec<FrameCallback>>,
    }

    impl QueueHost {
        /// Runs the pending callback, if any. Returns whether one ran.
        fn pump(&self, timestamp_ms: f64) -> bool {
            let next = self.pending.borrow_mut().pop();
            match next {
                Some(callback) => {
                    callback(timestamp_ms);
                    true
                }
                None => false,
            }
        }
    }

    impl Host for QueueHost {
        fn claim(&self) -> bool {
            true
        }
        fn layout(&self) -> Layout {
            Layout::new(320.0, 240.0, 1.0)
        }
        fn apply_size(&self, _size: SurfaceSize) {}
        fn show_unavailable(&self) {}
        fn request_frame(&self, callback: FrameCallback) {
            self.pending.borrow_mut().push(callback);
        }
    }

    struct Scripted {
        statuses: Vec<FrameStatus>,
    }

    impl FrameRenderer for Scripted {
        fn resize(&mut self, _size: SurfaceSize) {}
        fn render(&mut self, _plan: &FramePlan) -> FrameStatus {
            if self.statuses.is_empty() {
                FrameStatus::Presented
            } else {
                self.statuses.remove(0)
            }
        }
    }

    fn start(host: &Rc<QueueHost>, statuses: Vec<FrameStatus>) -> LoopHandle {
        let camera = CameraConfig::default();
        let driver = FrameDriver::new(
            Scripted { statuses },
            Transform::new(perspective(&camera, 1.0)),
            camera,
            DrawCall::NonIndexed { vertex_count: 3 },
        );
        FrameLoop::start(Rc::clone(host), driver)
    }

    #[test]
    fn start_requests_exactly_one_frame() {
        let host = Rc::new(QueueHost::default());
        let handle = start(&host, vec![]);

        assert_eq!(host.pending.borrow().len(), 1);
        assert_eq!(handle.frames(), 0);
        assert!(handle.is_running());
    }

    #[test]
    fn each_step_requests_the_next_frame() {
        let host = Rc::new(QueueHost::default());
        let handle = start(&host, vec![]);

        for i in 0..10 {
            assert!(host.pump(i as f64 * 16.0));
            assert_eq!(host.pending.borrow().len(), 1);
        }
        assert_eq!(handle.frames(), 10);
    }

    #[test]
    fn skipped_frames_keep_the_loop_alive() {
        let host = Rc::new(QueueHost::default());
        let handle = start(&host, vec![FrameStatus::Skipped, FrameStatus::Skipped]);

        for _ in 0..3 {
            assert!(host.pump(0.0));
        }
        assert!(handle.is_running());
        assert_eq!(handle.frames(), 3);
    }

    #[test]
    fn lost_surface_stops_the_loop() {
        let host = Rc::new(QueueHost::default());
        let handle = start(&host, vec![FrameStatus::Presented, FrameStatus::Lost]);

        assert!(host.pump(0.0));
        assert!(host.pump(16.0));
        assert!(!host.pump(32.0));
        assert!(!handle.is_running());
        assert_eq!(handle.frames(), 2);
    }

    #[test]
    fn stop_turns_pending_frame_into_no_op() {
        let host = Rc::new(QueueHost::default());
        let handle = start(&host, vec![]);

        handle.stop();
        assert!(host.pump(0.0));
        assert!(!host.pump(16.0));
        assert_eq!(handle.frames(), 0);
    }
}
