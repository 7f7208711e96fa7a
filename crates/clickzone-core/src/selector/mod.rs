//! Selector for the condition area.
//!
//! The selector is a rectangle the user moves by dragging its interior and
//! resizes by dragging its edges or corners. It always stays inside the
//! bounds given by [`Selector::clamp_to`], normally the visible part of the
//! capture.

mod area;
mod handles;

pub use area::{PixelRect, view_to_image_rect};
pub use handles::{Corner, Edge, GestureType, hit_test};

use crate::config::{ScreenMetrics, SelectorConfig};
use crate::input::{TouchAction, TouchEvent};
use crate::redraw::Invalidator;
use crate::render::Painter;
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

/// Corner handle squares are this many border widths wide.
const HANDLE_SCALE: f64 = 3.0;

/// Notifications emitted by the selector, drained by the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectorEvent {
    /// A touch-down hit the selector.
    GestureStarted(GestureType),
    /// The selector rectangle changed.
    PositionChanged(Rect),
    /// The gesture finished or was cancelled.
    GestureEnded(GestureType),
}

/// State of an active drag.
#[derive(Debug, Clone, Copy)]
struct DragState {
    gesture: GestureType,
    last_point: Point,
}

/// The selection rectangle and its gesture state machine.
#[derive(Debug)]
pub struct Selector {
    area: Rect,
    bounds: Rect,
    min_size: f64,
    default_size: f64,
    corner_radius: f64,
    edge_width: f64,
    border_width: f64,
    border_color: Color,
    background_color: Color,
    border_alpha: f32,
    background_alpha: f32,
    drag: Option<DragState>,
    placed: bool,
    events: Vec<SelectorEvent>,
    invalidator: Invalidator,
}

impl Selector {
    /// Create a selector. It is placed on the first view size change.
    pub fn new(config: &SelectorConfig, metrics: &ScreenMetrics, invalidator: Invalidator) -> Self {
        Self {
            area: Rect::ZERO,
            bounds: Rect::ZERO,
            min_size: metrics.dp_to_px(config.min_selector_size_dp),
            default_size: metrics.dp_to_px(config.default_selector_size_dp),
            corner_radius: metrics.dp_to_px(config.corner_handle_radius_dp),
            edge_width: metrics.dp_to_px(config.edge_handle_width_dp),
            border_width: metrics.dp_to_px(config.selector_border_width_dp),
            border_color: config.selector_border_color.to_color(),
            background_color: config.selector_background_color.to_color(),
            border_alpha: 0.0,
            background_alpha: 0.0,
            drag: None,
            placed: false,
            events: Vec::new(),
            invalidator,
        }
    }

    /// Current selector rectangle in view coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Minimum width and height in pixels.
    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// The gesture in progress, if any.
    pub fn current_gesture(&self) -> Option<GestureType> {
        self.drag.map(|drag| drag.gesture)
    }

    pub fn border_alpha(&self) -> f32 {
        self.border_alpha
    }

    pub fn set_border_alpha(&mut self, alpha: f32) {
        self.border_alpha = alpha.clamp(0.0, 1.0);
        self.invalidator.invalidate();
    }

    pub fn background_alpha(&self) -> f32 {
        self.background_alpha
    }

    pub fn set_background_alpha(&mut self, alpha: f32) {
        self.background_alpha = alpha.clamp(0.0, 1.0);
        self.invalidator.invalidate();
    }

    /// Take the notifications emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SelectorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Center a default-sized selector the first time the view is measured.
    pub fn on_view_size_changed(&mut self, width: f64, height: f64) {
        let view = Rect::new(0.0, 0.0, width, height);
        if !self.placed && !view.is_zero_area() {
            self.placed = true;
            self.bounds = view;
            let size = self.default_size.min(width).min(height);
            self.set_area(Rect::from_center_size(view.center(), Size::new(size, size)));
            return;
        }
        self.clamp_to(view);
    }

    /// Constrain the selector inside `bounds`, shrinking it if needed.
    pub fn clamp_to(&mut self, bounds: Rect) {
        if bounds.is_zero_area() {
            return;
        }
        self.bounds = bounds;
        if !self.placed {
            return;
        }

        let width = self.area.width().min(bounds.width());
        let height = self.area.height().min(bounds.height());
        let x0 = self.area.x0.clamp(bounds.x0, bounds.x1 - width);
        let y0 = self.area.y0.clamp(bounds.y0, bounds.y1 - height);
        self.set_area(Rect::new(x0, y0, x0 + width, y0 + height));
    }

    /// Map the selector into image pixels.
    ///
    /// `capture_area` is where the image is drawn in view space, zoom
    /// included; `image_size` is its size in pixels.
    pub fn selection_area(&self, capture_area: Rect, image_size: Size) -> PixelRect {
        view_to_image_rect(self.area, capture_area, image_size)
    }

    /// Run the gesture state machine.
    ///
    /// Returns true if the event was consumed.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        match event.action {
            TouchAction::Down => {
                let Some(point) = event.primary() else {
                    return false;
                };
                if !self.placed {
                    return false;
                }
                match hit_test(self.area, point, self.corner_radius, self.edge_width) {
                    Some(gesture) => {
                        log::debug!("Selector gesture started: {:?}", gesture);
                        self.drag = Some(DragState {
                            gesture,
                            last_point: point,
                        });
                        self.events.push(SelectorEvent::GestureStarted(gesture));
                        true
                    }
                    None => false,
                }
            }
            TouchAction::PointerDown => {
                // A second finger hands the touch sequence over to pinch-zoom.
                if let Some(drag) = self.drag.take() {
                    log::debug!("Selector gesture cancelled by pinch: {:?}", drag.gesture);
                    self.events.push(SelectorEvent::GestureEnded(drag.gesture));
                }
                false
            }
            TouchAction::Move => {
                let (Some(mut drag), Some(point)) = (self.drag, event.primary()) else {
                    return false;
                };
                let updated = self.apply_gesture(drag.gesture, point - drag.last_point);
                self.set_area(updated);
                drag.last_point = point;
                self.drag = Some(drag);
                true
            }
            TouchAction::PointerUp => self.drag.is_some(),
            TouchAction::Up | TouchAction::Cancel => match self.drag.take() {
                Some(drag) => {
                    if event.action == TouchAction::Cancel {
                        log::debug!("Selector gesture cancelled by host: {:?}", drag.gesture);
                    } else {
                        log::debug!("Selector gesture ended: {:?} at {:?}", drag.gesture, self.area);
                    }
                    self.events.push(SelectorEvent::GestureEnded(drag.gesture));
                    true
                }
                None => false,
            },
        }
    }

    /// Draw the background, border and corner handles.
    pub fn draw(&self, painter: &mut dyn Painter) {
        if !self.placed {
            return;
        }
        if self.background_alpha > 0.0 {
            painter.fill_rect(self.area, self.background_color.multiply_alpha(self.background_alpha));
        }
        if self.border_alpha > 0.0 {
            let border = self.border_color.multiply_alpha(self.border_alpha);
            painter.stroke_rect(self.area, border, self.border_width);

            let handle = Size::new(self.border_width * HANDLE_SCALE, self.border_width * HANDLE_SCALE);
            for corner in Corner::ALL {
                painter.fill_rect(Rect::from_center_size(corner.position(self.area), handle), border);
            }
        }
    }

    /// Compute the rectangle after applying a drag delta.
    fn apply_gesture(&self, gesture: GestureType, delta: Vec2) -> Rect {
        let mut rect = self.area;
        match gesture {
            GestureType::Move => {
                let dx = delta
                    .x
                    .clamp(self.bounds.x0 - rect.x0, (self.bounds.x1 - rect.x1).max(self.bounds.x0 - rect.x0));
                let dy = delta
                    .y
                    .clamp(self.bounds.y0 - rect.y0, (self.bounds.y1 - rect.y1).max(self.bounds.y0 - rect.y0));
                rect = rect + Vec2::new(dx, dy);
            }
            GestureType::ResizeEdge(edge) => {
                rect = self.resize_edge(rect, edge, delta);
            }
            GestureType::ResizeCorner(corner) => {
                let (horizontal, vertical) = corner.edges();
                rect = self.resize_edge(rect, horizontal, delta);
                rect = self.resize_edge(rect, vertical, delta);
            }
        }
        rect
    }

    /// Move one edge, keeping the minimum size and the bounds.
    fn resize_edge(&self, rect: Rect, edge: Edge, delta: Vec2) -> Rect {
        let min_width = self.min_size.min(self.bounds.width());
        let min_height = self.min_size.min(self.bounds.height());
        let mut rect = rect;
        match edge {
            Edge::Left => {
                rect.x0 = (rect.x0 + delta.x).clamp(self.bounds.x0, (rect.x1 - min_width).max(self.bounds.x0));
            }
            Edge::Right => {
                rect.x1 = (rect.x1 + delta.x).clamp((rect.x0 + min_width).min(self.bounds.x1), self.bounds.x1);
            }
            Edge::Top => {
                rect.y0 = (rect.y0 + delta.y).clamp(self.bounds.y0, (rect.y1 - min_height).max(self.bounds.y0));
            }
            Edge::Bottom => {
                rect.y1 = (rect.y1 + delta.y).clamp((rect.y0 + min_height).min(self.bounds.y1), self.bounds.y1);
            }
        }
        rect
    }

    fn set_area(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        self.events.push(SelectorEvent::PositionChanged(area));
        self.invalidator.invalidate();
    }
}
