//! Configuration for the condition selector view.
//!
//! All sizes are expressed in density-independent pixels (dp) and converted
//! once at construction using [`ScreenMetrics`].

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Pixel density of the screen.
///
/// Screen dimensions are not part of the metrics: the view learns its size
/// from [`crate::ConditionSelectorView::handle_resize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// Physical pixels per dp.
    pub density: f64,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl ScreenMetrics {
    pub fn new(density: f64) -> Self {
        Self { density }
    }

    /// Convert a dp value to physical pixels.
    pub fn dp_to_px(&self, dp: f64) -> f64 {
        dp * self.density
    }
}

/// Serializable RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Convert to a peniko color.
    pub fn to_color(self) -> Color {
        let [r, g, b, a] = self.0;
        Color::from_rgba8(r, g, b, a)
    }
}

/// Numeric and color configuration consumed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Minimum capture zoom level.
    pub zoom_min: f64,
    /// Maximum capture zoom level.
    pub zoom_max: f64,
    /// Zoom level the capture starts from when the intro animation runs.
    pub intro_zoom_from: f64,
    /// Duration of the selector intro animation, in milliseconds.
    pub show_selector_duration_ms: u64,
    /// Delay before the hints start fading out, in milliseconds.
    pub hints_fade_out_delay_ms: u64,
    /// Duration of the hints fade out, in milliseconds.
    pub hints_fade_out_duration_ms: u64,
    /// Width of the selector border, in dp.
    pub selector_border_width_dp: f64,
    /// Color of the selector border.
    pub selector_border_color: Rgba,
    /// Color of the selector background.
    pub selector_background_color: Rgba,
    /// Background alpha reached at the end of the intro animation.
    pub selector_background_alpha: f32,
    /// Touch radius around each selector corner, in dp.
    pub corner_handle_radius_dp: f64,
    /// Touch band width along each selector edge, in dp.
    pub edge_handle_width_dp: f64,
    /// Minimum selector width and height, in dp.
    pub min_selector_size_dp: f64,
    /// Selector size when the view is first measured, in dp.
    pub default_selector_size_dp: f64,
    /// Size of a hint icon, in dp.
    pub hint_icon_size_dp: f64,
    /// Gap between the selector and a hint icon, in dp.
    pub hint_margin_dp: f64,
    /// Color of the hint icons.
    pub hint_color: Rgba,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.8,
            zoom_max: 15.0,
            intro_zoom_from: 0.8,
            show_selector_duration_ms: 500,
            hints_fade_out_delay_ms: 1500,
            hints_fade_out_duration_ms: 500,
            selector_border_width_dp: 4.0,
            selector_border_color: Rgba([255, 255, 255, 255]),
            selector_background_color: Rgba([0, 0, 0, 255]),
            selector_background_alpha: 0.4,
            corner_handle_radius_dp: 24.0,
            edge_handle_width_dp: 16.0,
            min_selector_size_dp: 48.0,
            default_selector_size_dp: 120.0,
            hint_icon_size_dp: 24.0,
            hint_margin_dp: 8.0,
            hint_color: Rgba([255, 255, 255, 255]),
        }
    }
}

impl SelectorConfig {
    /// Parse and validate a JSON configuration. Missing fields use defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check the cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.zoom_min > 0.0) {
            return Err(invalid(format!("zoom_min must be positive, got {}", self.zoom_min)));
        }
        if self.zoom_min > 1.0 || self.zoom_max < 1.0 {
            return Err(invalid(format!(
                "zoom range [{}, {}] must contain 1.0",
                self.zoom_min, self.zoom_max
            )));
        }
        if self.intro_zoom_from < self.zoom_min || self.intro_zoom_from > self.zoom_max {
            return Err(invalid(format!(
                "intro_zoom_from {} is outside the zoom range",
                self.intro_zoom_from
            )));
        }
        if !(0.0..=1.0).contains(&self.selector_background_alpha) {
            return Err(invalid(format!(
                "selector_background_alpha {} is outside [0, 1]",
                self.selector_background_alpha
            )));
        }
        if !(self.min_selector_size_dp > 0.0) {
            return Err(invalid("min_selector_size_dp must be positive".to_string()));
        }
        if self.min_selector_size_dp > self.default_selector_size_dp {
            return Err(invalid(format!(
                "min_selector_size_dp {} exceeds default_selector_size_dp {}",
                self.min_selector_size_dp, self.default_selector_size_dp
            )));
        }
        if self.show_selector_duration_ms == 0 || self.hints_fade_out_duration_ms == 0 {
            return Err(invalid("animation durations must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn show_selector_duration(&self) -> Duration {
        Duration::from_millis(self.show_selector_duration_ms)
    }

    pub fn hints_fade_out_delay(&self) -> Duration {
        Duration::from_millis(self.hints_fade_out_delay_ms)
    }

    pub fn hints_fade_out_duration(&self) -> Duration {
        Duration::from_millis(self.hints_fade_out_duration_ms)
    }
}

fn invalid(message: String) -> ConfigError {
    log::warn!("Rejected selector config: {}", message);
    ConfigError::Invalid(message)
}
