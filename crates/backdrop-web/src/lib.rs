//! Browser entry point.
//!
//! Exposes `start(canvas, notice)` to JavaScript. The page supplies the canvas
//! that sits behind its content and, optionally, the element to reveal when the
//! browser cannot provide a GPU.
#![cfg(target_arch = "wasm32")]

mod console;
mod host;

use std::rc::Rc;

use backdrop_engine::geometry::CUBE;
use backdrop_engine::{mount, BackdropConfig, MountOutcome, WgpuBackend};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

pub use host::{CanvasHost, SizeSource};

/// Mounts the backdrop on `canvas`, sized to the window viewport.
///
/// Resolves to `true` once the frame loop is running. Resolves to `false` when
/// the GPU is unavailable (the notice has been revealed) or the canvas was
/// already started.
#[wasm_bindgen]
pub async fn start(canvas: HtmlCanvasElement, notice: Option<HtmlElement>) -> bool {
    console::install();

    let host = match CanvasHost::new(canvas, notice, SizeSource::Viewport) {
        Ok(host) => Rc::new(host),
        Err(e) => {
            log::error!("backdrop host unavailable: {e}");
            return false;
        }
    };

    match mount(host, &WgpuBackend, &CUBE, &BackdropConfig::default()).await {
        MountOutcome::Running(_) => true,
        MountOutcome::Unavailable => false,
        MountOutcome::AlreadyStarted => {
            log::debug!("start called again on a running canvas");
            false
        }
    }
}
