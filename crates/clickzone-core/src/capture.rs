//! Capture module for the background screenshot and its pan/zoom transform.

use crate::config::SelectorConfig;
use crate::input::{TouchAction, TouchEvent};
use crate::redraw::Invalidator;
use crate::render::Painter;
use image::RgbaImage;
use kurbo::{Point, Rect, Size, Vec2};

/// Zoom level at which the capture exactly fills its fitted area.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Touch interaction currently driven by the capture.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CaptureGesture {
    /// Single pointer dragging the capture around.
    Pan { last: Point },
    /// Two or more pointers zooming and panning.
    Pinch { last_focus: Point, last_span: f64 },
}

/// Capture owns the screenshot drawn behind the selector.
///
/// The capture area is where the image is drawn, in view coordinates. At
/// [`DEFAULT_ZOOM`] it is the image scaled down to fit the view (never scaled
/// up) and centered. Zooming scales the area; panning translates it.
#[derive(Debug)]
pub struct Capture {
    image: Option<RgbaImage>,
    view_size: Size,
    /// Capture area at the default zoom level.
    fitted_area: Rect,
    /// Center of the capture area in view coordinates.
    center: Point,
    zoom_level: f64,
    min_zoom: f64,
    max_zoom: f64,
    gesture: Option<CaptureGesture>,
    invalidator: Invalidator,
}

impl Capture {
    /// Create a capture with no image.
    pub fn new(config: &SelectorConfig, invalidator: Invalidator) -> Self {
        Self {
            image: None,
            view_size: Size::ZERO,
            fitted_area: Rect::ZERO,
            center: Point::ZERO,
            zoom_level: DEFAULT_ZOOM,
            min_zoom: config.zoom_min.min(config.zoom_max),
            max_zoom: config.zoom_min.max(config.zoom_max),
            gesture: None,
            invalidator,
        }
    }

    /// Install a new screenshot and reset the transform.
    pub fn set_image(&mut self, image: RgbaImage) {
        log::info!("Capture installed: {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.gesture = None;
        self.refit();
    }

    /// The current screenshot, if one was installed.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    /// Size of the screenshot in pixels, or zero without one.
    pub fn image_size(&self) -> Size {
        self.image
            .as_ref()
            .map(|img| Size::new(img.width() as f64, img.height() as f64))
            .unwrap_or(Size::ZERO)
    }

    /// Where the screenshot is drawn, in view coordinates.
    pub fn area(&self) -> Rect {
        if self.fitted_area.is_zero_area() {
            return Rect::ZERO;
        }
        let size = self.fitted_area.size() * self.zoom_level;
        Rect::from_center_size(self.center, size)
    }

    /// Current zoom level relative to the fitted size.
    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// The part of the capture area that lies inside the view.
    pub fn visible_bounds(&self) -> Rect {
        self.area().intersect(self.view_rect())
    }

    /// Number of view pixels per image pixel.
    pub fn pixel_scale(&self) -> f64 {
        let image_width = self.image_size().width;
        if image_width <= 0.0 {
            return 0.0;
        }
        self.area().width() / image_width
    }

    /// Convert a view point to image pixel coordinates.
    pub fn view_to_image(&self, point: Point) -> Option<Point> {
        let scale = self.pixel_scale();
        if scale <= 0.0 {
            return None;
        }
        let area = self.area();
        Some(Point::new(
            (point.x - area.x0) / scale,
            (point.y - area.y0) / scale,
        ))
    }

    /// Set the zoom level, keeping the capture area center fixed.
    ///
    /// The level is clamped to the configured range.
    pub fn set_zoom_level(&mut self, level: f64) {
        self.zoom_around(self.center, level);
    }

    /// Recompute the fitted area after the view was resized.
    pub fn on_view_size_changed(&mut self, width: f64, height: f64) {
        self.view_size = Size::new(width, height);
        self.refit();
    }

    /// Handle pan and pinch-zoom gestures.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        if self.image.is_none() {
            return false;
        }

        match event.action {
            TouchAction::Down => {
                self.gesture = event.primary().map(|last| CaptureGesture::Pan { last });
                self.gesture.is_some()
            }
            TouchAction::PointerDown => {
                self.start_pinch(event);
                true
            }
            TouchAction::Move => {
                match (self.gesture, event.pointer_count()) {
                    (Some(CaptureGesture::Pinch { last_focus, last_span }), n) if n >= 2 => {
                        let (Some(focus), span) = (event.focus(), event.span()) else {
                            return true;
                        };
                        if last_span > f64::EPSILON && span > f64::EPSILON {
                            let level = self.zoom_level * (span / last_span);
                            self.zoom_around(focus, level);
                        }
                        self.pan(focus - last_focus);
                        self.gesture = Some(CaptureGesture::Pinch {
                            last_focus: focus,
                            last_span: span,
                        });
                    }
                    (Some(CaptureGesture::Pan { last }), 1) => {
                        if let Some(position) = event.primary() {
                            self.pan(position - last);
                            self.gesture = Some(CaptureGesture::Pan { last: position });
                        }
                    }
                    // Pointer count changed without a pointer event: restart from here.
                    (_, n) if n >= 2 => self.start_pinch(event),
                    (_, _) => {
                        self.gesture = event.primary().map(|last| CaptureGesture::Pan { last });
                    }
                }
                true
            }
            TouchAction::PointerUp => {
                // The remaining pointers resume on the next move.
                self.gesture = None;
                true
            }
            TouchAction::Up | TouchAction::Cancel => self.gesture.take().is_some(),
        }
    }

    /// Draw the screenshot.
    pub fn draw(&self, painter: &mut dyn Painter) {
        if let Some(image) = &self.image {
            painter.draw_image(image, self.area());
        }
    }

    fn start_pinch(&mut self, event: &TouchEvent) {
        self.gesture = event.focus().map(|focus| CaptureGesture::Pinch {
            last_focus: focus,
            last_span: event.span(),
        });
        log::debug!("Capture pinch started");
    }

    fn view_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.view_size)
    }

    fn refit(&mut self) {
        let image_size = self.image_size();
        if image_size.is_zero_area() || self.view_size.is_zero_area() {
            self.fitted_area = Rect::ZERO;
            self.center = Point::ZERO;
            self.zoom_level = DEFAULT_ZOOM;
            self.invalidator.invalidate();
            return;
        }

        let scale = (self.view_size.width / image_size.width)
            .min(self.view_size.height / image_size.height)
            .min(1.0);
        let fitted_size = Size::new(image_size.width * scale, image_size.height * scale);
        let view_center = self.view_rect().center();

        self.fitted_area = Rect::from_center_size(view_center, fitted_size);
        self.center = view_center;
        self.zoom_level = DEFAULT_ZOOM;
        self.invalidator.invalidate();
    }

    /// Zoom to `level` keeping `pivot` fixed on screen.
    fn zoom_around(&mut self, pivot: Point, level: f64) {
        let new_zoom = level.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom_level).abs() < f64::EPSILON {
            return;
        }

        if !self.fitted_area.is_zero_area() {
            let ratio = new_zoom / self.zoom_level;
            self.center = pivot + (self.center - pivot) * ratio;
        }
        self.zoom_level = new_zoom;
        self.constrain();
        self.invalidator.invalidate();
    }

    fn pan(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.center += delta;
        self.constrain();
        self.invalidator.invalidate();
    }

    /// Keep the capture area center inside the view.
    fn constrain(&mut self) {
        if self.fitted_area.is_zero_area() || self.view_size.is_zero_area() {
            return;
        }
        self.center = Point::new(
            self.center.x.clamp(0.0, self.view_size.width),
            self.center.y.clamp(0.0, self.view_size.height),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn capture_800x600_in_1000x800() -> Capture {
        let mut capture = Capture::new(&SelectorConfig::default(), Invalidator::new());
        capture.on_view_size_changed(1000.0, 800.0);
        capture.set_image(RgbaImage::new(800, 600));
        capture
    }

    #[test]
    fn test_fit_does_not_upscale() {
        let capture = capture_800x600_in_1000x800();
        assert_eq!(capture.area(), Rect::new(100.0, 100.0, 900.0, 700.0));
        assert!((capture.zoom_level() - DEFAULT_ZOOM).abs() < EPS);
    }

    #[test]
    fn test_fit_downscales_preserving_aspect() {
        let mut capture = Capture::new(&SelectorConfig::default(), Invalidator::new());
        capture.on_view_size_changed(500.0, 500.0);
        capture.set_image(RgbaImage::new(1000, 500));

        let area = capture.area();
        assert!((area.width() - 500.0).abs() < EPS);
        assert!((area.height() - 250.0).abs() < EPS);
        assert!((area.y0 - 125.0).abs() < EPS);
        assert!((capture.pixel_scale() - 0.5).abs() < EPS);
    }

    #[test]
    fn test_zoom_clamped_to_max() {
        let mut capture = capture_800x600_in_1000x800();
        capture.set_zoom_level(100.0);
        assert!((capture.zoom_level() - 15.0).abs() < EPS);

        capture.set_zoom_level(0.01);
        assert!((capture.zoom_level() - 0.8).abs() < EPS);
    }

    #[test]
    fn test_inverted_zoom_range_normalized() {
        let config = SelectorConfig {
            zoom_min: 4.0,
            zoom_max: 2.0,
            ..SelectorConfig::default()
        };
        let mut capture = Capture::new(&config, Invalidator::new());
        capture.on_view_size_changed(1000.0, 800.0);
        capture.set_image(RgbaImage::new(800, 600));

        capture.set_zoom_level(3.0);
        assert!((capture.zoom_level() - 3.0).abs() < EPS);
        capture.set_zoom_level(0.5);
        assert!((capture.zoom_level() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_zoom_keeps_center() {
        let mut capture = capture_800x600_in_1000x800();
        capture.set_zoom_level(2.0);

        let area = capture.area();
        assert!((area.width() - 1600.0).abs() < EPS);
        assert!((area.center().x - 500.0).abs() < EPS);
        assert!((area.center().y - 400.0).abs() < EPS);
    }

    #[test]
    fn test_zoom_without_image_is_stored() {
        let mut capture = Capture::new(&SelectorConfig::default(), Invalidator::new());
        capture.set_zoom_level(3.0);
        assert!((capture.zoom_level() - 3.0).abs() < EPS);
        assert_eq!(capture.area(), Rect::ZERO);
    }

    #[test]
    fn test_single_pointer_pan() {
        let mut capture = capture_800x600_in_1000x800();

        assert!(capture.handle_touch(&TouchEvent::down(Point::new(500.0, 400.0))));
        assert!(capture.handle_touch(&TouchEvent::move_to(Point::new(530.0, 390.0))));
        assert!(capture.handle_touch(&TouchEvent::up(Point::new(530.0, 390.0))));

        assert_eq!(capture.area(), Rect::new(130.0, 90.0, 930.0, 690.0));
    }

    #[test]
    fn test_pan_keeps_center_in_view() {
        let mut capture = capture_800x600_in_1000x800();

        capture.handle_touch(&TouchEvent::down(Point::new(500.0, 400.0)));
        capture.handle_touch(&TouchEvent::move_to(Point::new(5000.0, 400.0)));

        assert!((capture.area().center().x - 1000.0).abs() < EPS);
    }

    #[test]
    fn test_pinch_zooms_around_focus() {
        let mut capture = capture_800x600_in_1000x800();

        capture.handle_touch(&TouchEvent::down(Point::new(450.0, 400.0)));
        capture.handle_touch(&TouchEvent::pointer_down(
            Point::new(450.0, 400.0),
            Point::new(550.0, 400.0),
        ));
        capture.handle_touch(&TouchEvent::pinch_move(
            Point::new(400.0, 400.0),
            Point::new(600.0, 400.0),
        ));

        assert!((capture.zoom_level() - 2.0).abs() < EPS);
        // The focus (500, 400) stays over the same image pixel.
        let image_point = capture.view_to_image(Point::new(500.0, 400.0)).unwrap();
        assert!((image_point.x - 400.0).abs() < EPS);
        assert!((image_point.y - 300.0).abs() < EPS);
    }

    #[test]
    fn test_touch_ignored_without_image() {
        let mut capture = Capture::new(&SelectorConfig::default(), Invalidator::new());
        capture.on_view_size_changed(1000.0, 800.0);
        assert!(!capture.handle_touch(&TouchEvent::down(Point::new(10.0, 10.0))));
    }

    #[test]
    fn test_visible_bounds_clipped_to_view() {
        let mut capture = capture_800x600_in_1000x800();
        capture.set_zoom_level(2.0);
        assert_eq!(capture.visible_bounds(), Rect::new(0.0, 0.0, 1000.0, 800.0));
    }

    #[test]
    fn test_mutators_request_redraw() {
        let invalidator = Invalidator::new();
        let mut capture = Capture::new(&SelectorConfig::default(), invalidator.clone());
        capture.on_view_size_changed(1000.0, 800.0);
        capture.set_image(RgbaImage::new(800, 600));
        assert!(invalidator.take());

        capture.set_zoom_level(1.5);
        assert!(invalidator.take());

        // Same level again is a no-op.
        capture.set_zoom_level(1.5);
        assert!(!invalidator.take());
    }
}
