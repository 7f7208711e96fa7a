//! Clickzone Core Library
//!
//! Platform-agnostic interaction logic for selecting a click-condition area
//! over a captured screen image.

pub mod animations;
pub mod capture;
pub mod config;
pub mod hints;
pub mod input;
pub mod measure;
pub mod redraw;
pub mod render;
pub mod selector;
pub mod view;

pub use animations::{AnimationEvent, Animations};
pub use capture::Capture;
pub use config::{ConfigError, ScreenMetrics, SelectorConfig};
pub use hints::{Hint, HintKind, HintsController};
pub use input::{TouchAction, TouchEvent};
pub use measure::{DrawGate, Insets, Margins, MeasureGate, apply_system_bar_insets};
pub use redraw::Invalidator;
pub use render::Painter;
pub use selector::{Corner, Edge, GestureType, PixelRect, Selector, SelectorEvent};
pub use view::{ConditionSelectorView, Selection, ViewError};
