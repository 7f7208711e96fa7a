//! Touch input model for multi-pointer gestures.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// What happened in a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchAction {
    /// First pointer went down.
    Down,
    /// An additional pointer went down.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer went up while others remain down.
    PointerUp,
    /// Last pointer went up.
    Up,
    /// The gesture was aborted by the host.
    Cancel,
}

/// A touch event with the positions of every pointer currently down.
///
/// Pointers are in view coordinates; the first one is the primary pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub pointers: Vec<Point>,
}

impl TouchEvent {
    /// Create a touch event.
    pub fn new(action: TouchAction, pointers: Vec<Point>) -> Self {
        Self { action, pointers }
    }

    /// Single pointer down.
    pub fn down(position: Point) -> Self {
        Self::new(TouchAction::Down, vec![position])
    }

    /// Single pointer move.
    pub fn move_to(position: Point) -> Self {
        Self::new(TouchAction::Move, vec![position])
    }

    /// Last pointer up.
    pub fn up(position: Point) -> Self {
        Self::new(TouchAction::Up, vec![position])
    }

    /// Second pointer down, with both positions.
    pub fn pointer_down(first: Point, second: Point) -> Self {
        Self::new(TouchAction::PointerDown, vec![first, second])
    }

    /// Two-pointer move.
    pub fn pinch_move(first: Point, second: Point) -> Self {
        Self::new(TouchAction::Move, vec![first, second])
    }

    /// Number of pointers in this event.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the primary pointer, if any.
    pub fn primary(&self) -> Option<Point> {
        self.pointers.first().copied()
    }

    /// Centroid of all pointers.
    pub fn focus(&self) -> Option<Point> {
        if self.pointers.is_empty() {
            return None;
        }
        let count = self.pointers.len() as f64;
        let (sum_x, sum_y) = self
            .pointers
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        Some(Point::new(sum_x / count, sum_y / count))
    }

    /// Average distance of the pointers from their focus.
    ///
    /// Ratios of successive spans give the pinch scale factor.
    pub fn span(&self) -> f64 {
        let Some(focus) = self.focus() else {
            return 0.0;
        };
        let total: f64 = self.pointers.iter().map(|p| p.distance(focus)).sum();
        total / self.pointers.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pointer_helpers() {
        let event = TouchEvent::down(Point::new(10.0, 20.0));
        assert_eq!(event.action, TouchAction::Down);
        assert_eq!(event.pointer_count(), 1);
        assert_eq!(event.primary(), Some(Point::new(10.0, 20.0)));
        assert!((event.span()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_focus_and_span() {
        let event = TouchEvent::pinch_move(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(event.focus(), Some(Point::new(50.0, 0.0)));
        assert!((event.span() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_event() {
        let event = TouchEvent::new(TouchAction::Cancel, Vec::new());
        assert_eq!(event.primary(), None);
        assert_eq!(event.focus(), None);
        assert!((event.span()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize() {
        let event: TouchEvent = serde_json::from_str(
            r#"{ "action": "pointer_down", "pointers": [{ "x": 1.0, "y": 2.0 }, { "x": 3.0, "y": 4.0 }] }"#,
        )
        .unwrap();
        assert_eq!(event.action, TouchAction::PointerDown);
        assert_eq!(event.pointers[1], Point::new(3.0, 4.0));
    }
}
