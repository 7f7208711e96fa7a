//! Helpers for acting on view measurement, draw timing and system insets.

use kurbo::Size;
use std::time::{Duration, Instant};

/// How long [`DrawGate`] holds back frames before drawing anyway.
pub const DEFAULT_DRAW_DELAY_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Defers work until the view has a non-zero size.
///
/// Items are returned to the caller to run rather than stored as closures,
/// so they can act on the owner of the gate.
#[derive(Debug)]
pub struct MeasureGate<T> {
    queued: Vec<T>,
}

impl<T> Default for MeasureGate<T> {
    fn default() -> Self {
        Self { queued: Vec::new() }
    }
}

impl<T> MeasureGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `item` to run now if `size` is measured, or queue it.
    pub fn do_when_measured(&mut self, size: Size, item: T) -> Option<T> {
        if is_measured(size) {
            return Some(item);
        }
        self.queued.push(item);
        None
    }

    /// Report a layout pass. Returns the queued items once measured.
    pub fn on_layout(&mut self, size: Size) -> Vec<T> {
        if !is_measured(size) {
            return Vec::new();
        }
        std::mem::take(&mut self.queued)
    }
}

fn is_measured(size: Size) -> bool {
    size.width != 0.0 && size.height != 0.0
}

/// Skips frames until a condition holds or a timeout expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawGate {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    timeout: Duration,
    deadline: Option<Instant>,
}

impl DrawGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold back frames until the condition passed to
    /// [`DrawGate::on_pre_draw`] is true, for at most `timeout` counted from
    /// the first held frame.
    pub fn delay_draw_until(&mut self, timeout: Duration) {
        self.armed = Some(Armed {
            timeout,
            deadline: None,
        });
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Decide whether the frame at `now` should be drawn.
    ///
    /// Disarms the gate once `ready` is true or the deadline has passed.
    pub fn on_pre_draw(&mut self, now: Instant, ready: bool) -> bool {
        let Some(armed) = &mut self.armed else {
            return true;
        };
        let deadline = *armed.deadline.get_or_insert(now + armed.timeout);
        if ready || now > deadline {
            if !ready {
                log::warn!("Draw delay timed out after {:?}", armed.timeout);
            }
            self.armed = None;
            return true;
        }
        false
    }
}

/// Insets reported by the system bars, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Layout margins of a view, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Add the system bar insets to the left, right and bottom margins.
///
/// The top inset is left to the status bar. The insets are consumed and must
/// not be passed down to child views.
pub fn apply_system_bar_insets(margins: Margins, insets: Insets) -> Margins {
    Margins {
        left: margins.left + insets.left,
        top: margins.top,
        right: margins.right + insets.right,
        bottom: margins.bottom + insets.bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_runs_immediately() {
        let mut gate = MeasureGate::new();
        assert_eq!(gate.do_when_measured(Size::new(10.0, 10.0), 1), Some(1));
        assert!(gate.on_layout(Size::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_unmeasured_waits_for_layout() {
        let mut gate = MeasureGate::new();
        assert_eq!(gate.do_when_measured(Size::new(0.0, 10.0), "intro"), None);
        assert!(gate.on_layout(Size::new(100.0, 0.0)).is_empty());
        assert_eq!(gate.on_layout(Size::new(100.0, 50.0)), vec!["intro"]);
        assert!(gate.on_layout(Size::new(100.0, 50.0)).is_empty());
    }

    #[test]
    fn test_draw_gate_passes_when_disarmed() {
        let mut gate = DrawGate::new();
        assert!(gate.on_pre_draw(Instant::now(), false));
    }

    #[test]
    fn test_draw_gate_waits_for_ready() {
        let mut gate = DrawGate::new();
        gate.delay_draw_until(DEFAULT_DRAW_DELAY_TIMEOUT);
        let start = Instant::now();

        assert!(!gate.on_pre_draw(start, false));
        assert!(!gate.on_pre_draw(start + Duration::from_millis(100), false));
        assert!(gate.on_pre_draw(start + Duration::from_millis(200), true));
        assert!(!gate.is_armed());
    }

    #[test]
    fn test_draw_gate_times_out() {
        let mut gate = DrawGate::new();
        gate.delay_draw_until(Duration::from_millis(50));
        let start = Instant::now();

        assert!(!gate.on_pre_draw(start, false));
        assert!(gate.on_pre_draw(start + Duration::from_millis(51), false));
        assert!(!gate.is_armed());
    }

    #[test]
    fn test_system_bar_insets() {
        let margins = Margins { left: 1.0, top: 2.0, right: 3.0, bottom: 4.0 };
        let insets = Insets { left: 10.0, top: 20.0, right: 30.0, bottom: 40.0 };

        let applied = apply_system_bar_insets(margins, insets);
        assert_eq!(applied, Margins { left: 11.0, top: 2.0, right: 33.0, bottom: 44.0 });
    }
}
