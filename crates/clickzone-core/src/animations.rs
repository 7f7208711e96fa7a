//! Time-based alpha and zoom transitions.
//!
//! Animations do not own a clock. The host calls [`Animations::update`] once
//! per frame with the current time, and a freshly started animation anchors
//! itself on the first frame it sees. Each update returns the values to apply
//! as [`AnimationEvent`]s; the view routes them to the capture, the selector
//! and the hints.

use crate::config::SelectorConfig;
use std::time::{Duration, Instant};

/// A value change or completion produced by an animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationEvent {
    ZoomLevel(f64),
    SelectorBorderAlpha(f32),
    SelectorBackgroundAlpha(f32),
    HintsAlpha(f32),
    /// The show-selector animation rendered its last frame.
    ShowSelectorCompleted,
    /// The hints finished fading out.
    HideHintsCompleted,
}

/// Interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Decelerating quadratic curve.
    EaseOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Timing of a single animation, anchored on its first frame.
#[derive(Debug, Clone, Copy)]
struct Timeline {
    start: Option<Instant>,
    delay: Duration,
    duration: Duration,
    easing: Easing,
}

impl Timeline {
    fn new(delay: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            start: None,
            delay,
            duration,
            easing,
        }
    }

    /// Eased progress at `now`, or `None` while still in the start delay.
    fn progress(&mut self, now: Instant) -> Option<f64> {
        let start = *self.start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.delay {
            return None;
        }
        let running = elapsed - self.delay;
        let fraction = if self.duration.is_zero() {
            1.0
        } else {
            running.as_secs_f64() / self.duration.as_secs_f64()
        };
        Some(self.easing.apply(fraction))
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[derive(Debug, Clone, Copy)]
struct ShowSelector {
    timeline: Timeline,
}

#[derive(Debug, Clone, Copy)]
struct HideHints {
    timeline: Timeline,
    from_alpha: f32,
}

/// Coordinates the intro animation and the hints fade out.
#[derive(Debug)]
pub struct Animations {
    show_duration: Duration,
    fade_delay: Duration,
    fade_duration: Duration,
    intro_zoom_from: f64,
    background_alpha: f32,
    show_selector: Option<ShowSelector>,
    hide_hints: Option<HideHints>,
    hints_alpha: f32,
    pending: Vec<AnimationEvent>,
}

impl Animations {
    pub fn new(config: &SelectorConfig) -> Self {
        Self {
            show_duration: config.show_selector_duration(),
            fade_delay: config.hints_fade_out_delay(),
            fade_duration: config.hints_fade_out_duration(),
            intro_zoom_from: config.intro_zoom_from,
            background_alpha: config.selector_background_alpha,
            show_selector: None,
            hide_hints: None,
            hints_alpha: 1.0,
            pending: Vec::new(),
        }
    }

    /// Fade the selector in while zooming the capture to its default level.
    ///
    /// The starting values are emitted on the next update, so the first
    /// frame never shows the previous state.
    pub fn start_show_selector_animation(&mut self) {
        log::info!("Starting show selector animation");
        self.show_selector = Some(ShowSelector {
            timeline: Timeline::new(Duration::ZERO, self.show_duration, Easing::EaseOut),
        });
        self.pending.extend([
            AnimationEvent::ZoomLevel(self.intro_zoom_from),
            AnimationEvent::SelectorBorderAlpha(0.0),
            AnimationEvent::SelectorBackgroundAlpha(0.0),
        ]);
    }

    /// Fade the hints out after the configured delay, starting from their
    /// current alpha.
    pub fn start_hide_hints_animation(&mut self) {
        self.hide_hints = Some(HideHints {
            timeline: Timeline::new(self.fade_delay, self.fade_duration, Easing::Linear),
            from_alpha: self.hints_alpha,
        });
    }

    /// Stop the hints fade out. The hints alpha keeps its current value.
    pub fn cancel_hide_hints_animation(&mut self) {
        if self.hide_hints.take().is_some() {
            log::debug!("Hide hints animation cancelled at alpha {}", self.hints_alpha);
        }
    }

    /// Cancel any fade out and bring the hints back to full opacity.
    pub fn reveal_hints(&mut self) {
        self.hide_hints = None;
        if self.hints_alpha < 1.0 {
            self.hints_alpha = 1.0;
            self.pending.push(AnimationEvent::HintsAlpha(1.0));
        }
    }

    /// Current hints alpha, as last emitted.
    pub fn hints_alpha(&self) -> f32 {
        self.hints_alpha
    }

    pub fn is_show_selector_running(&self) -> bool {
        self.show_selector.is_some()
    }

    pub fn is_hide_hints_running(&self) -> bool {
        self.hide_hints.is_some()
    }

    /// Check if any animation still needs frames.
    pub fn is_running(&self) -> bool {
        self.show_selector.is_some() || self.hide_hints.is_some() || !self.pending.is_empty()
    }

    /// Advance every running animation to `now`.
    pub fn update(&mut self, now: Instant) -> Vec<AnimationEvent> {
        let mut events = std::mem::take(&mut self.pending);

        if let Some(show) = &mut self.show_selector {
            if let Some(t) = show.timeline.progress(now) {
                let eased = t.min(1.0);
                events.push(AnimationEvent::ZoomLevel(lerp(self.intro_zoom_from, 1.0, eased)));
                events.push(AnimationEvent::SelectorBorderAlpha(eased as f32));
                events.push(AnimationEvent::SelectorBackgroundAlpha(
                    lerp(0.0, self.background_alpha as f64, eased) as f32,
                ));
                if t >= 1.0 {
                    self.show_selector = None;
                    events.push(AnimationEvent::ShowSelectorCompleted);
                }
            }
        }

        if let Some(hide) = &mut self.hide_hints {
            if let Some(t) = hide.timeline.progress(now) {
                let alpha = lerp(hide.from_alpha as f64, 0.0, t.min(1.0)) as f32;
                self.hints_alpha = alpha;
                events.push(AnimationEvent::HintsAlpha(alpha));
                if t >= 1.0 {
                    self.hide_hints = None;
                    events.push(AnimationEvent::HideHintsCompleted);
                }
            }
        }

        events
    }
}
