//! Directional hint icons shown around the selector.

use crate::config::{ScreenMetrics, SelectorConfig};
use crate::redraw::Invalidator;
use crate::render::Painter;
use crate::selector::{Corner, Edge, GestureType};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use std::collections::HashSet;

/// Which hint an icon represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// Four-way arrow at the selector center.
    Move,
    /// Arrow outside an edge midpoint.
    Edge(Edge),
    /// Diagonal arrow outside a corner.
    Corner(Corner),
}

impl HintKind {
    pub const ALL: [HintKind; 9] = [
        HintKind::Move,
        HintKind::Edge(Edge::Top),
        HintKind::Edge(Edge::Right),
        HintKind::Edge(Edge::Bottom),
        HintKind::Edge(Edge::Left),
        HintKind::Corner(Corner::TopLeft),
        HintKind::Corner(Corner::TopRight),
        HintKind::Corner(Corner::BottomLeft),
        HintKind::Corner(Corner::BottomRight),
    ];
}

impl From<GestureType> for HintKind {
    fn from(gesture: GestureType) -> Self {
        match gesture {
            GestureType::Move => HintKind::Move,
            GestureType::ResizeEdge(edge) => HintKind::Edge(edge),
            GestureType::ResizeCorner(corner) => HintKind::Corner(corner),
        }
    }
}

/// A positioned hint icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hint {
    pub kind: HintKind,
    /// Icon bounds in view coordinates.
    pub bounds: Rect,
}

/// Controls the display of the user hints around the selector.
#[derive(Debug)]
pub struct HintsController {
    hints: Vec<Hint>,
    visible: HashSet<HintKind>,
    alpha: f32,
    icon_size: f64,
    margin: f64,
    color: Color,
    view_bounds: Rect,
    selector_area: Rect,
    invalidator: Invalidator,
}

impl HintsController {
    pub fn new(config: &SelectorConfig, metrics: &ScreenMetrics, invalidator: Invalidator) -> Self {
        Self {
            hints: HintKind::ALL
                .iter()
                .map(|&kind| Hint { kind, bounds: Rect::ZERO })
                .collect(),
            visible: HashSet::new(),
            alpha: 1.0,
            icon_size: metrics.dp_to_px(config.hint_icon_size_dp),
            margin: metrics.dp_to_px(config.hint_margin_dp),
            color: config.hint_color.to_color(),
            view_bounds: Rect::ZERO,
            selector_area: Rect::ZERO,
            invalidator,
        }
    }

    /// Show only the hints relevant to `gesture`.
    pub fn show(&mut self, gesture: GestureType) {
        let kind = HintKind::from(gesture);
        if self.visible.len() == 1 && self.visible.contains(&kind) {
            return;
        }
        self.visible.clear();
        self.visible.insert(kind);
        self.invalidator.invalidate();
    }

    pub fn show_all(&mut self) {
        self.visible.extend(HintKind::ALL);
        self.invalidator.invalidate();
    }

    pub fn hide_all(&mut self) {
        self.visible.clear();
        self.invalidator.invalidate();
    }

    pub fn is_visible(&self, kind: HintKind) -> bool {
        self.visible.contains(&kind)
    }

    pub fn has_visible(&self) -> bool {
        !self.visible.is_empty()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.invalidator.invalidate();
    }

    /// Position of a hint, if it exists.
    pub fn hint(&self, kind: HintKind) -> Option<&Hint> {
        self.hints.iter().find(|hint| hint.kind == kind)
    }

    /// Hints currently shown.
    pub fn visible_hints(&self) -> impl Iterator<Item = &Hint> {
        self.hints.iter().filter(|hint| self.visible.contains(&hint.kind))
    }

    pub fn on_view_size_changed(&mut self, width: f64, height: f64) {
        self.view_bounds = Rect::new(0.0, 0.0, width, height);
        self.layout();
    }

    /// Reposition the icons around the selector.
    pub fn set_selector_area(&mut self, area: Rect) {
        self.selector_area = area;
        self.layout();
    }

    pub fn draw(&self, painter: &mut dyn Painter) {
        if self.alpha <= 0.0 {
            return;
        }
        let color = self.color.multiply_alpha(self.alpha);
        for hint in self.visible_hints() {
            painter.draw_hint(hint.kind, hint.bounds, color);
        }
    }

    fn layout(&mut self) {
        let area = self.selector_area;
        let offset = self.margin + self.icon_size / 2.0;
        let size = Size::new(self.icon_size, self.icon_size);

        for hint in &mut self.hints {
            let center = match hint.kind {
                HintKind::Move => area.center(),
                HintKind::Edge(edge) => {
                    let outward = match edge {
                        Edge::Top => Vec2::new(0.0, -offset),
                        Edge::Right => Vec2::new(offset, 0.0),
                        Edge::Bottom => Vec2::new(0.0, offset),
                        Edge::Left => Vec2::new(-offset, 0.0),
                    };
                    edge.midpoint(area) + outward
                }
                HintKind::Corner(corner) => {
                    let outward = match corner {
                        Corner::TopLeft => Vec2::new(-offset, -offset),
                        Corner::TopRight => Vec2::new(offset, -offset),
                        Corner::BottomLeft => Vec2::new(-offset, offset),
                        Corner::BottomRight => Vec2::new(offset, offset),
                    };
                    corner.position(area) + outward
                }
            };
            hint.bounds = keep_inside(Rect::from_center_size(center, size), self.view_bounds);
        }
        self.invalidator.invalidate();
    }
}

/// Translate `rect` so it lies inside `bounds` when it fits.
fn keep_inside(rect: Rect, bounds: Rect) -> Rect {
    if bounds.is_zero_area() || rect.width() > bounds.width() || rect.height() > bounds.height() {
        return rect;
    }
    let origin = Point::new(
        rect.x0.clamp(bounds.x0, bounds.x1 - rect.width()),
        rect.y0.clamp(bounds.y0, bounds.y1 - rect.height()),
    );
    Rect::from_origin_size(origin, rect.size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawOp, RecordingPainter};

    fn controller() -> HintsController {
        let mut hints = HintsController::new(
            &SelectorConfig::default(),
            &ScreenMetrics::default(),
            Invalidator::new(),
        );
        hints.on_view_size_changed(1000.0, 800.0);
        hints.set_selector_area(Rect::new(100.0, 100.0, 300.0, 300.0));
        hints
    }

    #[test]
    fn test_show_only_gesture_hint() {
        let mut hints = controller();
        hints.show_all();
        hints.show(GestureType::ResizeEdge(Edge::Left));

        let visible: Vec<_> = hints.visible_hints().map(|h| h.kind).collect();
        assert_eq!(visible, vec![HintKind::Edge(Edge::Left)]);
    }

    #[test]
    fn test_show_all_and_hide_all() {
        let mut hints = controller();
        hints.show_all();
        assert_eq!(hints.visible_hints().count(), HintKind::ALL.len());

        hints.hide_all();
        assert!(!hints.has_visible());
    }

    #[test]
    fn test_edge_hint_outside_selector() {
        let hints = controller();
        // 24px icon, 8px margin: center 20px above the top edge.
        let top = hints.hint(HintKind::Edge(Edge::Top)).unwrap();
        assert_eq!(top.bounds, Rect::new(188.0, 68.0, 212.0, 92.0));

        let right = hints.hint(HintKind::Edge(Edge::Right)).unwrap();
        assert_eq!(right.bounds, Rect::new(308.0, 188.0, 332.0, 212.0));
    }

    #[test]
    fn test_move_hint_centered() {
        let hints = controller();
        let center = hints.hint(HintKind::Move).unwrap().bounds.center();
        assert_eq!(center, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_hints_kept_in_view() {
        let mut hints = controller();
        hints.set_selector_area(Rect::new(0.0, 0.0, 200.0, 200.0));

        let corner = hints.hint(HintKind::Corner(Corner::TopLeft)).unwrap();
        assert_eq!(corner.bounds, Rect::new(0.0, 0.0, 24.0, 24.0));
    }

    #[test]
    fn test_draw_uses_alpha() {
        let mut hints = controller();
        hints.show(GestureType::Move);
        hints.set_alpha(0.5);

        let mut painter = RecordingPainter::default();
        hints.draw(&mut painter);
        assert_eq!(painter.ops.len(), 1);
        assert!(matches!(
            painter.ops[0],
            DrawOp::Hint { kind: HintKind::Move, alpha, .. } if (alpha - 0.5).abs() < 1e-6
        ));

        hints.set_alpha(0.0);
        let mut painter = RecordingPainter::default();
        hints.draw(&mut painter);
        assert!(painter.ops.is_empty());
    }
}
