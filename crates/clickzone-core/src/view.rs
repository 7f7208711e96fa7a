//! Condition selector view.
//!
//! The view composes the capture, the selector, the hints and the animations.
//! It receives size, touch and draw dispatch from the host, routes the
//! components' events between them and exposes the current selection.

use crate::animations::{AnimationEvent, Animations};
use crate::capture::Capture;
use crate::config::{ScreenMetrics, SelectorConfig};
use crate::hints::HintsController;
use crate::input::TouchEvent;
use crate::measure::{DEFAULT_DRAW_DELAY_TIMEOUT, DrawGate, MeasureGate};
use crate::redraw::Invalidator;
use crate::render::Painter;
use crate::selector::{PixelRect, Selector, SelectorEvent};
use image::RgbaImage;
use kurbo::Size;
use std::time::Instant;
use thiserror::Error;

/// Errors returned when extracting the selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("No capture has been shown")]
    NoCapture,
    #[error("Selection does not overlap the capture")]
    EmptySelection,
}

/// The selected part of the capture.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Selected area in image pixels.
    pub area: PixelRect,
    /// Pixels of the selected area.
    pub image: RgbaImage,
}

/// Work deferred until the view is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ShowSelector,
}

/// Overlay view used to select the area of a capture for a click condition.
///
/// The capture can be zoomed and moved, and a selector drawn over it lets the
/// user pick a section of the screen.
#[derive(Debug)]
pub struct ConditionSelectorView {
    capture: Capture,
    selector: Selector,
    hints: HintsController,
    animations: Animations,
    hidden: bool,
    view_size: Size,
    measure_gate: MeasureGate<Deferred>,
    draw_gate: DrawGate,
    invalidator: Invalidator,
}

impl ConditionSelectorView {
    /// Create the view. Configuration is consumed here and not read again.
    pub fn new(config: &SelectorConfig, metrics: ScreenMetrics) -> Self {
        let invalidator = Invalidator::new();
        let mut draw_gate = DrawGate::new();
        draw_gate.delay_draw_until(DEFAULT_DRAW_DELAY_TIMEOUT);

        Self {
            capture: Capture::new(config, invalidator.clone()),
            selector: Selector::new(config, &metrics, invalidator.clone()),
            hints: HintsController::new(config, &metrics, invalidator.clone()),
            animations: Animations::new(config),
            hidden: true,
            view_size: Size::ZERO,
            measure_gate: MeasureGate::new(),
            draw_gate,
            invalidator,
        }
    }

    /// Tell if the content of this view should be hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.invalidator.invalidate();
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn hints(&self) -> &HintsController {
        &self.hints
    }

    pub fn animations(&self) -> &Animations {
        &self.animations
    }

    pub fn zoom_level(&self) -> f64 {
        self.capture.zoom_level()
    }

    /// Zoom the capture, keeping the selector inside it.
    pub fn set_zoom_level(&mut self, level: f64) {
        self.capture.set_zoom_level(level);
        self.clamp_selector();
        self.dispatch_selector_events();
    }

    /// Show a new capture and play the intro animation.
    pub fn show_capture(&mut self, image: RgbaImage) {
        self.capture.set_image(image);
        self.clamp_selector();
        self.dispatch_selector_events();
        self.hints.show_all();
        self.animations.reveal_hints();

        if let Some(deferred) = self.measure_gate.do_when_measured(self.view_size, Deferred::ShowSelector) {
            self.run(deferred);
        } else {
            log::debug!("View not measured yet, intro animation deferred");
        }
    }

    /// Get the part of the capture currently inside the selector.
    pub fn selection(&self) -> Result<Selection, ViewError> {
        let image = self.capture.image().ok_or(ViewError::NoCapture)?;
        let area = self
            .selector
            .selection_area(self.capture.area(), self.capture.image_size());
        if area.is_empty() {
            return Err(ViewError::EmptySelection);
        }
        let pixels = image::imageops::crop_imm(image, area.x, area.y, area.width, area.height).to_image();
        Ok(Selection { area, image: pixels })
    }

    /// Host callback: the view was resized.
    pub fn handle_resize(&mut self, width: f64, height: f64) {
        self.view_size = Size::new(width, height);
        self.selector.on_view_size_changed(width, height);
        self.capture.on_view_size_changed(width, height);
        self.hints.on_view_size_changed(width, height);
        self.clamp_selector();
        self.dispatch_selector_events();

        for deferred in self.measure_gate.on_layout(self.view_size) {
            self.run(deferred);
        }
        self.invalidator.invalidate();
    }

    /// Host callback: a touch event. Returns true if it was consumed.
    pub fn handle_touch(&mut self, event: &TouchEvent) -> bool {
        if let Some(gesture) = self.selector.current_gesture() {
            self.hints.show(gesture);
            self.animations.cancel_hide_hints_animation();
        }

        let consumed = if self.selector.handle_touch(event) {
            true
        } else if self.capture.handle_touch(event) {
            self.clamp_selector();
            true
        } else {
            false
        };
        self.dispatch_selector_events();
        consumed
    }

    /// Host callback: decide whether this frame should be drawn.
    ///
    /// Frames are held back until a capture is shown, or the draw timeout
    /// expires.
    pub fn pre_draw(&mut self, now: Instant) -> bool {
        let ready = self.capture.image().is_some();
        self.draw_gate.on_pre_draw(now, ready)
    }

    /// Host callback: draw the capture, the selector and the hints, in that order.
    pub fn handle_draw(&self, painter: &mut dyn Painter) {
        if self.hidden {
            return;
        }
        self.capture.draw(painter);
        self.selector.draw(painter);
        self.hints.draw(painter);
    }

    /// Advance animations to `now`. Returns true while more frames are needed.
    pub fn update(&mut self, now: Instant) -> bool {
        for event in self.animations.update(now) {
            match event {
                // The intro zoom is transient: the selector is constrained
                // again once it completes.
                AnimationEvent::ZoomLevel(level) => self.capture.set_zoom_level(level),
                AnimationEvent::SelectorBorderAlpha(alpha) => self.selector.set_border_alpha(alpha),
                AnimationEvent::SelectorBackgroundAlpha(alpha) => {
                    self.selector.set_background_alpha(alpha)
                }
                AnimationEvent::HintsAlpha(alpha) => self.hints.set_alpha(alpha),
                AnimationEvent::ShowSelectorCompleted => {
                    self.clamp_selector();
                    if self.selector.current_gesture().is_none() {
                        self.animations.start_hide_hints_animation();
                    }
                }
                AnimationEvent::HideHintsCompleted => self.hints.hide_all(),
            }
        }
        self.dispatch_selector_events();
        self.animations.is_running()
    }

    /// Return whether a redraw was requested since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        self.invalidator.take()
    }

    fn run(&mut self, deferred: Deferred) {
        match deferred {
            Deferred::ShowSelector => self.animations.start_show_selector_animation(),
        }
    }

    fn clamp_selector(&mut self) {
        self.selector.clamp_to(self.capture.visible_bounds());
    }

    fn dispatch_selector_events(&mut self) {
        for event in self.selector.drain_events() {
            match event {
                SelectorEvent::GestureStarted(gesture) => {
                    self.hints.show(gesture);
                    self.animations.reveal_hints();
                }
                SelectorEvent::PositionChanged(area) => self.hints.set_selector_area(area),
                SelectorEvent::GestureEnded(_) => self.animations.start_hide_hints_animation(),
            }
        }
    }
}
