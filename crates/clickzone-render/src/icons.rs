//! Arrow icons for the selector hints.

use clickzone_core::{Corner, Edge, HintKind};
use kurbo::{Point, Rect, Vec2};
use tiny_skia::{Path, PathBuilder};

/// Arrowhead length relative to the icon half size.
const HEAD_LENGTH: f64 = 0.45;
/// Arrowhead half width relative to its length.
const HEAD_SPREAD: f64 = 0.8;

/// Paths of a hint icon: shafts are stroked, heads are filled.
pub(crate) struct HintIcon {
    pub shafts: Path,
    pub heads: Path,
}

/// Stroke width of the arrow shafts for an icon of these bounds.
pub(crate) fn shaft_width(bounds: Rect) -> f32 {
    (half_size(bounds) * 0.2).max(1.0) as f32
}

fn half_size(bounds: Rect) -> f64 {
    bounds.width().min(bounds.height()) / 2.0
}

/// Directions the arrows of a hint point to, from the icon center.
fn directions(kind: HintKind) -> Vec<Vec2> {
    let diagonal = std::f64::consts::FRAC_1_SQRT_2;
    match kind {
        HintKind::Move => vec![
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
        ],
        HintKind::Edge(Edge::Top | Edge::Bottom) => vec![Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)],
        HintKind::Edge(Edge::Left | Edge::Right) => vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)],
        HintKind::Corner(Corner::TopLeft | Corner::BottomRight) => vec![
            Vec2::new(-diagonal, -diagonal),
            Vec2::new(diagonal, diagonal),
        ],
        HintKind::Corner(Corner::TopRight | Corner::BottomLeft) => vec![
            Vec2::new(diagonal, -diagonal),
            Vec2::new(-diagonal, diagonal),
        ],
    }
}

/// Build the icon for `kind` fitted in `bounds`.
pub(crate) fn hint_icon(kind: HintKind, bounds: Rect) -> Option<HintIcon> {
    let half = half_size(bounds);
    if half <= 0.0 {
        return None;
    }
    let center = bounds.center();
    let head_length = half * HEAD_LENGTH;

    let mut shafts = PathBuilder::new();
    let mut heads = PathBuilder::new();
    for dir in directions(kind) {
        let tip = center + dir * half;
        let base = tip - dir * head_length;
        let side = Vec2::new(-dir.y, dir.x) * head_length * HEAD_SPREAD;

        move_to(&mut shafts, center);
        line_to(&mut shafts, base);

        move_to(&mut heads, tip);
        line_to(&mut heads, base + side);
        line_to(&mut heads, base - side);
        heads.close();
    }

    Some(HintIcon {
        shafts: shafts.finish()?,
        heads: heads.finish()?,
    })
}

fn move_to(builder: &mut PathBuilder, point: Point) {
    builder.move_to(point.x as f32, point.y as f32);
}

fn line_to(builder: &mut PathBuilder, point: Point) {
    builder.line_to(point.x as f32, point.y as f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_hint_has_an_icon() {
        let bounds = Rect::new(0.0, 0.0, 24.0, 24.0);
        for kind in HintKind::ALL {
            let icon = hint_icon(kind, bounds).unwrap();
            let extent = icon.heads.bounds();
            assert!(extent.left() >= -1e-3 && extent.right() <= 24.001);
            assert!(extent.top() >= -1e-3 && extent.bottom() <= 24.001);
        }
    }

    #[test]
    fn test_empty_bounds_have_no_icon() {
        assert!(hint_icon(HintKind::Move, Rect::ZERO).is_none());
    }

    #[test]
    fn test_edge_arrows_follow_normal() {
        let vertical = directions(HintKind::Edge(Edge::Top));
        assert!(vertical.iter().all(|dir| dir.x == 0.0));
        let horizontal = directions(HintKind::Edge(Edge::Right));
        assert!(horizontal.iter().all(|dir| dir.y == 0.0));
    }
}
