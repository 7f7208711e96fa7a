//! Gesture script format.

use anyhow::{Context, Result, bail};
use clickzone_core::TouchEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Dispatch a touch event to the view.
    Touch(TouchEvent),
    /// Let time pass, rendering animation frames.
    AdvanceMs(u64),
    /// Set the capture zoom level.
    Zoom(f64),
    /// Hide or show the view content.
    Hide(bool),
}

/// A recorded interaction: the view size and the steps to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// View width and height in pixels.
    pub view: [f64; 2],
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(json).context("Invalid gesture script")?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<()> {
        let [width, height] = self.view;
        if !(width >= 1.0 && height >= 1.0) {
            bail!("View size must be at least 1x1, got {width}x{height}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickzone_core::TouchAction;
    use kurbo::Point;
    use std::io::Write;

    #[test]
    fn test_parse_steps() {
        let script = Script::from_json_str(
            r#"{
                "view": [1000, 800],
                "steps": [
                    {"touch": {"action": "down", "pointers": [{"x": 500, "y": 400}]}},
                    {"advance_ms": 100},
                    {"zoom": 2.5},
                    {"hide": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(script.view, [1000.0, 800.0]);
        assert_eq!(
            script.steps[0],
            Step::Touch(TouchEvent::new(TouchAction::Down, vec![Point::new(500.0, 400.0)]))
        );
        assert_eq!(script.steps[1], Step::AdvanceMs(100));
        assert_eq!(script.steps[2], Step::Zoom(2.5));
        assert_eq!(script.steps[3], Step::Hide(true));
    }

    #[test]
    fn test_steps_default_to_empty() {
        let script = Script::from_json_str(r#"{"view": [10, 10]}"#).unwrap();
        assert!(script.steps.is_empty());
    }

    #[test]
    fn test_rejects_empty_view() {
        assert!(Script::from_json_str(r#"{"view": [0, 10]}"#).is_err());
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(Script::from_json_str(r#"{"view": [10, 10], "steps": [{"jump": 1}]}"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"view": [320, 240], "steps": [{{"advance_ms": 5}}]}}"#).unwrap();

        let script = Script::from_file(file.path()).unwrap();
        assert_eq!(script.steps, vec![Step::AdvanceMs(5)]);
    }
}
