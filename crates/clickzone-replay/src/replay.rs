//! Replays a script on a virtual clock.

use crate::script::{Script, Step};
use anyhow::Result;
use clickzone_core::{ConditionSelectorView, ScreenMetrics, SelectorConfig};
use image::RgbaImage;
use peniko::Color;
use std::time::{Duration, Instant};

/// Interval between animation frames.
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on the frames rendered while waiting for animations to end.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// State of the view once a script was replayed.
pub struct Outcome {
    pub view: ConditionSelectorView,
    /// Virtual time elapsed since the capture was shown.
    pub elapsed: Duration,
}

/// Virtual frame clock driving the view animations.
struct Clock {
    start: Instant,
    now: Instant,
}

impl Clock {
    fn new() -> Self {
        let start = Instant::now();
        Self { start, now: start }
    }

    /// Advance by `duration`, updating the view on every frame.
    fn advance(&mut self, view: &mut ConditionSelectorView, duration: Duration) {
        let end = self.now + duration;
        while self.now < end {
            self.now = (self.now + FRAME).min(end);
            view.update(self.now);
        }
    }

    /// Run frames until no animation needs more.
    fn settle(&mut self, view: &mut ConditionSelectorView) {
        let mut frames = 0;
        while view.update(self.now) {
            if frames == MAX_SETTLE_FRAMES {
                log::warn!("Animations still running after {frames} frames");
                break;
            }
            self.now += FRAME;
            frames += 1;
        }
    }
}

/// Show `image` in a view sized by the script, then replay its steps.
///
/// Animations are run to completion once the last step has been replayed.
pub fn run(
    script: &Script,
    image: RgbaImage,
    config: &SelectorConfig,
    metrics: ScreenMetrics,
) -> Result<Outcome> {
    config.validate()?;
    let [width, height] = script.view;

    let mut view = ConditionSelectorView::new(config, metrics);
    view.handle_resize(width, height);
    view.set_hidden(false);
    view.show_capture(image);

    let mut clock = Clock::new();
    view.update(clock.now);

    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Touch(event) => {
                let consumed = view.handle_touch(event);
                log::debug!("Step {index}: {:?} consumed={consumed}", event.action);
                view.update(clock.now);
            }
            Step::AdvanceMs(ms) => clock.advance(&mut view, Duration::from_millis(*ms)),
            Step::Zoom(level) => {
                view.set_zoom_level(*level);
                view.update(clock.now);
            }
            Step::Hide(hidden) => view.set_hidden(*hidden),
        }
    }
    clock.settle(&mut view);

    Ok(Outcome {
        elapsed: clock.now.saturating_duration_since(clock.start),
        view,
    })
}

/// Render the current frame of `view` over a black background.
pub fn preview(view: &ConditionSelectorView, size: [f64; 2]) -> Result<RgbaImage> {
    let [width, height] = size;
    let frame = clickzone_render::render_frame(
        view,
        width.round() as u32,
        height.round() as u32,
        Color::BLACK,
    )?;
    Ok(frame)
}
