//! Handle definitions and hit-testing for the selector.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner on a rectangle.
    pub fn position(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }

    /// The horizontal and vertical edges meeting at this corner.
    pub fn edges(self) -> (Edge, Edge) {
        match self {
            Corner::TopLeft => (Edge::Left, Edge::Top),
            Corner::TopRight => (Edge::Right, Edge::Top),
            Corner::BottomLeft => (Edge::Left, Edge::Bottom),
            Corner::BottomRight => (Edge::Right, Edge::Bottom),
        }
    }
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Midpoint of this edge on a rectangle.
    pub fn midpoint(self, rect: Rect) -> Point {
        let center = rect.center();
        match self {
            Edge::Top => Point::new(center.x, rect.y0),
            Edge::Right => Point::new(rect.x1, center.y),
            Edge::Bottom => Point::new(center.x, rect.y1),
            Edge::Left => Point::new(rect.x0, center.y),
        }
    }
}

/// Classification of an active selector gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureType {
    /// Moving the whole selector.
    Move,
    /// Resizing by dragging one edge.
    ResizeEdge(Edge),
    /// Resizing by dragging one corner.
    ResizeCorner(Corner),
}

/// Find the gesture started by a touch at `point`.
///
/// Corners win over edges, and edges win over the interior. A point outside
/// every handle and outside the rectangle starts nothing.
pub fn hit_test(rect: Rect, point: Point, corner_radius: f64, edge_width: f64) -> Option<GestureType> {
    for corner in Corner::ALL {
        if corner.position(rect).distance(point) <= corner_radius {
            return Some(GestureType::ResizeCorner(corner));
        }
    }

    let half = edge_width / 2.0;
    let within_x = point.x >= rect.x0 - half && point.x <= rect.x1 + half;
    let within_y = point.y >= rect.y0 - half && point.y <= rect.y1 + half;
    for edge in Edge::ALL {
        let hit = match edge {
            Edge::Top => within_x && (point.y - rect.y0).abs() <= half,
            Edge::Bottom => within_x && (point.y - rect.y1).abs() <= half,
            Edge::Left => within_y && (point.x - rect.x0).abs() <= half,
            Edge::Right => within_y && (point.x - rect.x1).abs() <= half,
        };
        if hit {
            return Some(GestureType::ResizeEdge(edge));
        }
    }

    if rect.contains(point) {
        return Some(GestureType::Move);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::new(100.0, 100.0, 300.0, 300.0)
    }

    #[test]
    fn test_corner_wins_over_edge() {
        // On the top edge, but within the corner radius.
        let hit = hit_test(rect(), Point::new(110.0, 100.0), 24.0, 16.0);
        assert_eq!(hit, Some(GestureType::ResizeCorner(Corner::TopLeft)));
    }

    #[test]
    fn test_edge_hit() {
        let hit = hit_test(rect(), Point::new(200.0, 305.0), 24.0, 16.0);
        assert_eq!(hit, Some(GestureType::ResizeEdge(Edge::Bottom)));

        let hit = hit_test(rect(), Point::new(96.0, 200.0), 24.0, 16.0);
        assert_eq!(hit, Some(GestureType::ResizeEdge(Edge::Left)));
    }

    #[test]
    fn test_interior_moves() {
        let hit = hit_test(rect(), Point::new(200.0, 200.0), 24.0, 16.0);
        assert_eq!(hit, Some(GestureType::Move));
    }

    #[test]
    fn test_outside_misses() {
        assert_eq!(hit_test(rect(), Point::new(400.0, 400.0), 24.0, 16.0), None);
        assert_eq!(hit_test(rect(), Point::new(200.0, 50.0), 24.0, 16.0), None);
    }

    #[test]
    fn test_corner_edges() {
        assert_eq!(Corner::BottomRight.edges(), (Edge::Right, Edge::Bottom));
        assert_eq!(Corner::TopLeft.position(rect()), Point::new(100.0, 100.0));
        assert_eq!(Edge::Right.midpoint(rect()), Point::new(300.0, 200.0));
    }
}
