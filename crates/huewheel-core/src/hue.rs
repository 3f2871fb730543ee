//! Scientific ↔ artistic hue remapping.
//!
//! Hues are stored "scientifically" (the angle used by HSV color math), but
//! the wheel image does not spread hues evenly around the circle: the warm
//! reds, oranges and yellows take up far more arc than the greens. The
//! remapper converts between the two with a piecewise-linear function
//! calibrated against the reference wheel image.
//!
//! ```text
//!   scientific   0 ── 35 ── 60 ── 120 ── 180 ── 240 ── 300 ── 360
//!   artistic     0 ── 60 ── 122 ─ 165 ── 218 ── 275 ── 330 ── 360
//! ```

use crate::error::DomainError;

/// One full turn, in degrees.
pub const FULL_TURN: f64 = 360.0;

/// `(scientific, artistic)` knots of the reference wheel image.
const REFERENCE_KNOTS: [(f64, f64); 8] = [
    (0.0, 0.0),
    (35.0, 60.0),
    (60.0, 122.0),
    (120.0, 165.0),
    (180.0, 218.0),
    (240.0, 275.0),
    (300.0, 330.0),
    (360.0, 360.0),
];

/// Wrap any angle into `[0, 360)`. Non-finite input maps to `0`.
///
/// Negative inputs wrap from the top, so `-20` becomes `340`.
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }
    let h = hue.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if h >= FULL_TURN { 0.0 } else { h }
}

/// Linear interpolation of `value` from `[from_low, from_high]` onto
/// `[to_low, to_high]`.
///
/// For example, `map_range(5, 0, 10, 0, 100) == 50`.
fn map_range(
    value: f64,
    from_low: f64,
    from_high: f64,
    to_low: f64,
    to_high: f64,
) -> Result<f64, DomainError> {
    let width = from_high - from_low;
    if width <= 0.0 {
        return Err(DomainError::DegenerateSegment {
            low: from_low,
            high: from_high,
        });
    }
    Ok(to_low + (value - from_low) * (to_high - to_low) / width)
}

/// Bidirectional piecewise-linear hue mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct HueRemapper {
    scientific: Vec<f64>,
    artistic: Vec<f64>,
}

impl HueRemapper {
    /// Build a remapper from `(scientific, artistic)` knots.
    ///
    /// Both columns must be strictly increasing so that every segment has
    /// a non-zero width in each direction.
    pub fn from_knots(knots: &[(f64, f64)]) -> Result<Self, DomainError> {
        if knots.len() < 2 {
            return Err(DomainError::TooFewKnots(knots.len()));
        }
        for (index, pair) in knots.windows(2).enumerate() {
            let (s0, a0) = pair[0];
            let (s1, a1) = pair[1];
            if s1 <= s0 || a1 <= a0 {
                return Err(DomainError::NonMonotonic { index: index + 1 });
            }
        }
        Ok(Self {
            scientific: knots.iter().map(|k| k.0).collect(),
            artistic: knots.iter().map(|k| k.1).collect(),
        })
    }

    /// Scientific hue → angular position on the wheel image.
    pub fn to_artistic(&self, scientific_hue: f64) -> Result<f64, DomainError> {
        interpolate(&self.scientific, &self.artistic, scientific_hue)
    }

    /// Angular position on the wheel image → scientific hue.
    pub fn to_scientific(&self, artistic_hue: f64) -> Result<f64, DomainError> {
        interpolate(&self.artistic, &self.scientific, artistic_hue)
    }
}

impl Default for HueRemapper {
    fn default() -> Self {
        Self {
            scientific: REFERENCE_KNOTS.iter().map(|k| k.0).collect(),
            artistic: REFERENCE_KNOTS.iter().map(|k| k.1).collect(),
        }
    }
}

fn interpolate(from: &[f64], to: &[f64], hue: f64) -> Result<f64, DomainError> {
    let hue = normalize_hue(hue);
    // The last segment also takes anything at or beyond its upper knot.
    let last = from.len() - 2;
    let seg = (0..last).find(|&i| hue < from[i + 1]).unwrap_or(last);
    let mapped = map_range(hue, from[seg], from[seg + 1], to[seg], to[seg + 1])?;
    Ok(normalize_hue(mapped))
}
