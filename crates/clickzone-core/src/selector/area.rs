//! Mapping between the selector in view space and image pixels.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Tolerance absorbing float error before rounding to whole pixels.
const PIXEL_EPSILON: f64 = 1e-6;

/// An integer rectangle in image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Map a view-space rectangle to image pixels.
///
/// `capture_area` is where the image is drawn, zoom included, so the view
/// pixels per image pixel are `capture_area.width() / image_size.width`. The
/// result is rounded outward and clamped to the image.
pub fn view_to_image_rect(rect: Rect, capture_area: Rect, image_size: Size) -> PixelRect {
    if capture_area.is_zero_area() || image_size.is_zero_area() {
        return PixelRect::default();
    }

    let visible = rect.intersect(capture_area);
    if visible.is_zero_area() {
        return PixelRect::default();
    }

    let scale = capture_area.width() / image_size.width;
    let to_image = |v: f64, origin: f64| (v - origin) / scale;

    let x0 = (to_image(visible.x0, capture_area.x0) + PIXEL_EPSILON).floor();
    let y0 = (to_image(visible.y0, capture_area.y0) + PIXEL_EPSILON).floor();
    let x1 = (to_image(visible.x1, capture_area.x0) - PIXEL_EPSILON).ceil();
    let y1 = (to_image(visible.y1, capture_area.y0) - PIXEL_EPSILON).ceil();

    let x0 = x0.clamp(0.0, image_size.width);
    let y0 = y0.clamp(0.0, image_size.height);
    let x1 = x1.clamp(x0, image_size.width);
    let y1 = y1.clamp(y0, image_size.height);

    PixelRect::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
}
