/// Host layout reading: logical size plus device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub css_width: f64,
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl Layout {
    #[inline]
    pub const fn new(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            pixel_ratio,
        }
    }
}

/// Backing buffer size derived from a [`Layout`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSize {
    /// Backing buffer width in physical pixels.
    pub width: u32,
    /// Backing buffer height in physical pixels.
    pub height: u32,
    /// Logical width applied back to the element's style.
    pub css_width: f64,
    /// Logical height applied back to the element's style.
    pub css_height: f64,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    /// Scales the layout by its pixel ratio.
    ///
    /// Fractional pixels truncate, like assigning to `canvas.width`. Negative or
    /// non-finite readings clamp to zero.
    pub fn from_layout(layout: Layout) -> Self {
        let pixel_ratio = sanitize(layout.pixel_ratio).max(f64::MIN_POSITIVE);
        let css_width = sanitize(layout.css_width);
        let css_height = sanitize(layout.css_height);

        Self {
            width: to_pixels(css_width * pixel_ratio),
            height: to_pixels(css_height * pixel_ratio),
            css_width,
            css_height,
            pixel_ratio,
        }
    }

    /// Caps each backing dimension at `max` (the device texture limit).
    ///
    /// CSS size and pixel ratio are kept; only the drawable resolution drops.
    pub fn clamped(self, max: u32) -> Self {
        Self {
            width: self.width.min(max),
            height: self.height.min(max),
            ..self
        }
    }

    /// True when either dimension is zero; such a surface cannot be drawn to.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Backing buffer width / height.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// True when the backing buffer dimensions match.
    #[inline]
    pub fn same_pixels(&self, other: &SurfaceSize) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn to_pixels(v: f64) -> u32 {
    v.trunc().min(u32::MAX as f64) as u32
}
