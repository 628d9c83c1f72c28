use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};
use backdrop_engine::frame::LoopHandle;
use backdrop_engine::geometry::CUBE;
use backdrop_engine::{mount, BackdropConfig, MountOutcome, WgpuBackend};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::host::WindowHost;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub backdrop: BackdropConfig,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            title: "backdrop preview".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            backdrop: BackdropConfig::default(),
        }
    }
}

pub struct Preview {
    config: PreviewConfig,
    host: Option<Rc<WindowHost>>,
    handle: Option<LoopHandle>,
}

impl Preview {
    pub fn run(config: PreviewConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = Preview {
            config,
            host: None,
            handle: None,
        };

        event_loop
            .run_app(&mut app)
            .context("winit event loop terminated with error")?;

        Ok(())
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(true);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let host = Rc::new(WindowHost::new(Arc::new(window), self.config.title.clone()));

        let outcome = pollster::block_on(mount(
            Rc::clone(&host),
            &WgpuBackend,
            &CUBE,
            &self.config.backdrop,
        ));

        if let MountOutcome::Running(handle) = outcome {
            self.handle = Some(handle);
        }
        self.host = Some(host);

        Ok(())
    }
}

impl ApplicationHandler for Preview {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        if let Err(e) = self.open_window(event_loop) {
            log::error!("failed to open preview window: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(handle) = self.handle.take() {
                    log::info!("closing after {} frames", handle.frames());
                    handle.stop();
                }
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => {
                if let Some(host) = &self.host {
                    host.run_pending();
                }
            }

            _ => {}
        }
    }
}
