//! Picker configuration.

use serde::{Deserialize, Serialize};

use crate::error::PickerError;
use crate::harmony::Mode;

/// Default wheel radius in pixels.
const DEFAULT_RADIUS: f64 = 175.0;
/// Default marker diameter in pixels.
const DEFAULT_MARKER_WIDTH: f64 = 40.0;
/// Default analogous spacing in artistic degrees.
const DEFAULT_SLICE: f64 = 20.0;
/// Markers synthesized when binding without data.
const DEFAULT_COUNT: usize = 5;

/// Construction-time settings for a [`crate::ColorWheelPicker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Wheel radius in pixels. The wheel occupies `2r × 2r`.
    pub radius: f64,
    /// Marker diameter in pixels; half of it is left as margin around
    /// the wheel so rim markers are not cut off.
    pub marker_width: f64,
    /// Initial analogous spacing, in artistic degrees.
    pub default_slice: f64,
    /// Color of synthesized markers, as a hex string.
    pub initial_root: String,
    /// Mode the picker starts in.
    pub initial_mode: Mode,
    /// Markers bound when the picker is created.
    pub initial_count: usize,
    /// Markers synthesized by [`crate::ColorWheelPicker::bind_default`].
    pub default_count: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            marker_width: DEFAULT_MARKER_WIDTH,
            default_slice: DEFAULT_SLICE,
            initial_root: "#ff0000".to_string(),
            initial_mode: Mode::Analogous,
            initial_count: 1,
            default_count: DEFAULT_COUNT,
        }
    }
}

impl PickerConfig {
    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, PickerError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PickerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PickerError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PickerError::Config(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.marker_width.is_finite() && self.marker_width > 0.0) {
            return Err(PickerError::Config(format!(
                "marker_width must be positive, got {}",
                self.marker_width
            )));
        }
        if !self.default_slice.is_finite() {
            return Err(PickerError::Config("default_slice must be finite".into()));
        }
        Ok(())
    }

    /// Space kept around the wheel edge.
    pub fn margin(&self) -> f64 {
        self.marker_width / 2.0
    }

    /// SVG view box `[min_x, min_y, width, height]` including the margin.
    pub fn view_box(&self) -> [f64; 4] {
        let m = self.margin();
        let d = self.radius * 2.0;
        [-m, -m, d + 2.0 * m, d + 2.0 * m]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = PickerConfig::default();
        assert_eq!(c.radius, 175.0);
        assert_eq!(c.margin(), 20.0);
        assert_eq!(c.view_box(), [-20.0, -20.0, 390.0, 390.0]);
        assert_eq!(c.initial_mode, Mode::Analogous);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let c = PickerConfig::from_json(r#"{"radius": 100.0, "initial_mode": "Triad"}"#).unwrap();
        assert_eq!(c.radius, 100.0);
        assert_eq!(c.initial_mode, Mode::Triad);
        assert_eq!(c.default_slice, 20.0);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = PickerConfig::from_json(r#"{"radius": -1.0}"#).unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        let err = PickerConfig::from_json(r#"{"initial_mode": "Pentad"}"#).unwrap_err();
        assert!(matches!(err, PickerError::Config(_)));
    }
}
