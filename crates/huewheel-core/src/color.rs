//! HSV color value and its display-string conversions.
//!
//! The engine only ever does arithmetic on `{hue, saturation, value}`
//! triples. Conversion to RGB/HSL and string formatting is delegated to
//! `palette`.

use palette::{FromColor, Hsl, Hsv, Srgb, encoding};
use serde::{Deserialize, Serialize};

use crate::error::PickerError;
use crate::hue::normalize_hue;

type SrgbHsv = Hsv<encoding::Srgb, f64>;
type SrgbHsl = Hsl<encoding::Srgb, f64>;

/// An HSV color with the hue in scientific degrees.
///
/// Invariant: `0 <= hue < 360`, `saturation` and `value` in `0..=1`.
/// Every constructor normalizes, so the invariant holds for any instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ColorRepr")]
pub struct Color {
    hue: f64,
    saturation: f64,
    value: f64,
}

#[derive(Deserialize)]
struct ColorRepr {
    hue: f64,
    saturation: f64,
    value: f64,
}

impl From<ColorRepr> for Color {
    fn from(raw: ColorRepr) -> Self {
        Self::new(raw.hue, raw.saturation, raw.value)
    }
}

impl Default for Color {
    /// Pure red, the color new markers start at.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

/// String form requested from [`Color::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#rrggbb`
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
    /// `hsl(h, s%, l%)`
    Hsl,
    /// `hsv(h, s%, v%)`
    Hsv,
}

impl Color {
    pub fn new(hue: f64, saturation: f64, value: f64) -> Self {
        Self {
            hue: normalize_hue(hue),
            saturation: clamp_unit(saturation),
            value: clamp_unit(value),
        }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, PickerError> {
        let rgb: Srgb<u8> = hex
            .trim()
            .parse()
            .map_err(|e| PickerError::InvalidColor(format!("{hex:?}: {e}")))?;
        let hsv = SrgbHsv::from_color(rgb.into_format::<f64>());
        Ok(Self::new(
            hsv.hue.into_positive_degrees(),
            hsv.saturation,
            hsv.value,
        ))
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_hue(&mut self, hue: f64) {
        self.hue = normalize_hue(hue);
    }

    pub fn set_saturation(&mut self, saturation: f64) {
        self.saturation = clamp_unit(saturation);
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_unit(value);
    }

    /// Same hue and saturation at full brightness, as markers are filled
    /// on the wheel.
    pub fn at_full_value(&self) -> Self {
        Self { value: 1.0, ..*self }
    }

    /// 8-bit sRGB components.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let hsv = SrgbHsv::new(self.hue, self.saturation, self.value);
        let rgb: Srgb<u8> = Srgb::<f64>::from_color(hsv).into_format();
        [rgb.red, rgb.green, rgb.blue]
    }

    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    pub fn to_hsl_string(&self) -> String {
        let hsl = SrgbHsl::from_color(SrgbHsv::new(self.hue, self.saturation, self.value));
        format!(
            "hsl({}, {}%, {}%)",
            self.hue.round(),
            (hsl.saturation * 100.0).round(),
            (hsl.lightness * 100.0).round()
        )
    }

    pub fn to_hsv_string(&self) -> String {
        format!(
            "hsv({}, {}%, {}%)",
            self.hue.round(),
            (self.saturation * 100.0).round(),
            (self.value * 100.0).round()
        )
    }

    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex_string(),
            ColorFormat::Rgb => self.to_rgb_string(),
            ColorFormat::Hsl => self.to_hsl_string(),
            ColorFormat::Hsv => self.to_hsv_string(),
        }
    }
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_new_normalizes() {
        let c = Color::new(-30.0, 1.4, -0.2);
        assert!((c.hue() - 330.0).abs() < EPSILON);
        assert_eq!(c.saturation(), 1.0);
        assert_eq!(c.value(), 0.0);

        let c = Color::new(f64::NAN, f64::NAN, 0.5);
        assert_eq!(c.hue(), 0.0);
        assert_eq!(c.saturation(), 0.0);
    }

    #[test]
    fn test_default_is_red() {
        assert_eq!(Color::default().to_hex_string(), "#ff0000");
    }

    #[test]
    fn test_string_forms() {
        let c = Color::new(120.0, 1.0, 1.0);
        assert_eq!(c.to_hex_string(), "#00ff00");
        assert_eq!(c.to_rgb_string(), "rgb(0, 255, 0)");
        assert_eq!(c.to_hsl_string(), "hsl(120, 100%, 50%)");
        assert_eq!(c.to_hsv_string(), "hsv(120, 100%, 100%)");
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#0000ff").unwrap();
        assert!((c.hue() - 240.0).abs() < 1e-6, "{}", c.hue());
        assert!((c.saturation() - 1.0).abs() < EPSILON);
        assert!((c.value() - 1.0).abs() < EPSILON);

        let short = Color::from_hex("f00").unwrap();
        assert_eq!(short.to_hex_string(), "#ff0000");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            Color::from_hex("not a color"),
            Err(PickerError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_at_full_value() {
        let c = Color::new(10.0, 0.5, 0.3).at_full_value();
        assert_eq!(c.value(), 1.0);
        assert_eq!(c.saturation(), 0.5);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let c: Color =
            serde_json::from_str(r#"{"hue": 400.0, "saturation": 2.0, "value": 0.5}"#).unwrap();
        assert!((c.hue() - 40.0).abs() < EPSILON);
        assert_eq!(c.saturation(), 1.0);
    }
}
