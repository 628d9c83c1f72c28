use backdrop_engine::surface::{Layout, SurfaceSize};
use backdrop_engine::{FrameCallback, Host, SurfaceProvider};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

/// Attribute marking a canvas the backdrop has claimed.
const CLAIM_ATTRIBUTE: &str = "data-backdrop";

/// Class added to the notice element when the GPU is unavailable.
const UNAVAILABLE_CLASS: &str = "unavailable";

/// Which box the canvas is sized to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SizeSource {
    /// `window.innerWidth` x `window.innerHeight`.
    #[default]
    Viewport,
    /// The canvas's parent element client box.
    Parent,
}

#[derive(Debug, thiserror::Error)]
#[error("no global window (not running in a browser main thread)")]
pub struct NoWindow;

pub struct CanvasHost {
    window: Window,
    canvas: HtmlCanvasElement,
    notice: Option<HtmlElement>,
    source: SizeSource,
}

impl CanvasHost {
    pub fn new(
        canvas: HtmlCanvasElement,
        notice: Option<HtmlElement>,
        source: SizeSource,
    ) -> Result<Self, NoWindow> {
        let window = web_sys::window().ok_or(NoWindow)?;
        Ok(Self {
            window,
            canvas,
            notice,
            source,
        })
    }

    fn css_size(&self) -> (f64, f64) {
        match self.source {
            SizeSource::Viewport => (
                number(self.window.inner_width()),
                number(self.window.inner_height()),
            ),
            SizeSource::Parent => self
                .canvas
                .parent_element()
                .map(|parent| (parent.client_width() as f64, parent.client_height() as f64))
                .unwrap_or((0.0, 0.0)),
        }
    }
}

fn number(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

impl Host for CanvasHost {
    fn claim(&self) -> bool {
        if self.canvas.has_attribute(CLAIM_ATTRIBUTE) {
            return false;
        }
        self.canvas.set_attribute(CLAIM_ATTRIBUTE, "running").is_ok()
    }

    fn layout(&self) -> Layout {
        let (css_width, css_height) = self.css_size();
        Layout::new(css_width, css_height, self.window.device_pixel_ratio())
    }

    fn apply_size(&self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);

        let style = self.canvas.style();
        for (property, value) in [("width", size.css_width), ("height", size.css_height)] {
            if let Err(e) = style.set_property(property, &format!("{value}px")) {
                log::warn!("could not set canvas style {property}: {e:?}");
            }
        }
    }

    fn show_unavailable(&self) {
        let Some(notice) = &self.notice else {
            return;
        };
        if let Err(e) = notice.class_list().add_1(UNAVAILABLE_CLASS) {
            log::warn!("could not reveal unavailable notice: {e:?}");
        }
    }

    fn request_frame(&self, callback: FrameCallback) {
        let closure = Closure::once_into_js(move |timestamp_ms: f64| callback(timestamp_ms));
        if let Err(e) = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

impl SurfaceProvider for CanvasHost {
    fn surface_target(&self) -> wgpu::SurfaceTarget<'static> {
        wgpu::SurfaceTarget::Canvas(self.canvas.clone())
    }
}
