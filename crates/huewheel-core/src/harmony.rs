//! Harmony rules: derive every visible marker's color from the root.
//!
//! Let `R` be the root's artistic hue and `i` a marker's position among the
//! visible markers (root is `0`). Hues are computed in artistic space and
//! mapped back to scientific hue before being stored.
//!
//! | Mode          | Artistic hue           | Saturation / value                  |
//! |---------------|------------------------|-------------------------------------|
//! | Analogous     | `R + d(i) × slice`     | `1`, `1`                            |
//! | Monochromatic | `R`                    | `1 − (0.15 i + U[0, 0.1])`, `0.75 + U[0, 0.25]` |
//! | Shades        | `R`                    | `1`, `0.25 + U[0, 0.75]`            |
//! | Complementary | `R + (i mod 2) × 180`  | `1 − 0.08 ⌊i / 2⌋`, `1`             |
//! | Triad         | `R + (i mod 3) × 120`  | `1 − 0.08 ⌊i / 3⌋`, `1`             |
//! | Tetrad        | `R + (i mod 4) × 90`   | `1 − 0.08 ⌊i / 4⌋`, `1`             |
//! | Custom        | unchanged              | unchanged                           |
//!
//! where `d(i)` is [`distance_from_root`].

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, PickerError};
use crate::hue::{FULL_TURN, HueRemapper, normalize_hue};
use crate::markers::{MarkerSet, distance_from_root};

/// Saturation drop per repetition of a complementary/triad/tetrad cycle.
const OFFSET_FACTOR: f64 = 0.08;

/// Saturation drop per marker in monochromatic mode.
const MONO_SATURATION_STEP: f64 = 0.15;
const MONO_SATURATION_JITTER: f64 = 0.1;
const MONO_VALUE_FLOOR: f64 = 0.75;

const SHADES_VALUE_FLOOR: f64 = 0.25;

/// How non-root markers follow the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// No automatic harmony; the palette is user-authored.
    Custom,
    Analogous,
    Complementary,
    Triad,
    Tetrad,
    Monochromatic,
    Shades,
}

impl Mode {
    /// Mode names as shown to users.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Analogous => "Analogous",
            Self::Complementary => "Complementary",
            Self::Triad => "Triad",
            Self::Tetrad => "Tetrad",
            Self::Monochromatic => "Monochromatic",
            Self::Shades => "Shades",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Mode; 7] = [
            Mode::Custom,
            Mode::Analogous,
            Mode::Complementary,
            Mode::Triad,
            Mode::Tetrad,
            Mode::Monochromatic,
            Mode::Shades,
        ];
        &ALL
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PickerError::InvalidMode(s.to_string()))
    }
}

/// Recompute every visible marker from the root under `mode`.
///
/// Does nothing when there is no visible marker or `mode` is
/// [`Mode::Custom`].
pub fn apply_harmony<R: Rng>(
    mode: Mode,
    markers: &mut MarkerSet,
    slice: f64,
    remapper: &HueRemapper,
    rng: &mut R,
) -> Result<(), DomainError> {
    let Some(root) = markers.root() else {
        return Ok(());
    };
    let root_hue = remapper.to_artistic(root.color.hue())?;

    match mode {
        Mode::Custom => {}
        Mode::Analogous => {
            for (i, marker) in markers.visible_mut().enumerate() {
                let offset = distance_from_root(i) as f64 * slice;
                let color = &mut marker.color;
                color.set_hue(remapper.to_scientific(wrap(root_hue + offset))?);
                color.set_saturation(1.0);
                color.set_value(1.0);
            }
        }
        Mode::Monochromatic => {
            let hue = remapper.to_scientific(root_hue)?;
            for (i, marker) in markers.visible_mut().enumerate() {
                let color = &mut marker.color;
                color.set_hue(hue);
                let jitter = rng.random_range(0.0..=MONO_SATURATION_JITTER);
                color.set_saturation(1.0 - (MONO_SATURATION_STEP * i as f64 + jitter));
                color.set_value(MONO_VALUE_FLOOR + rng.random_range(0.0..=1.0 - MONO_VALUE_FLOOR));
            }
        }
        Mode::Shades => {
            let hue = remapper.to_scientific(root_hue)?;
            for marker in markers.visible_mut() {
                let color = &mut marker.color;
                color.set_hue(hue);
                color.set_saturation(1.0);
                color.set_value(
                    SHADES_VALUE_FLOOR + rng.random_range(0.0..=1.0 - SHADES_VALUE_FLOOR),
                );
            }
        }
        Mode::Complementary => apply_cycle(markers, root_hue, 2, remapper)?,
        Mode::Triad => apply_cycle(markers, root_hue, 3, remapper)?,
        Mode::Tetrad => apply_cycle(markers, root_hue, 4, remapper)?,
    }
    Ok(())
}

/// Spread the visible markers over `n` evenly spaced hues, dropping
/// saturation each time the cycle repeats.
fn apply_cycle(
    markers: &mut MarkerSet,
    root_hue: f64,
    n: usize,
    remapper: &HueRemapper,
) -> Result<(), DomainError> {
    let step = FULL_TURN / n as f64;
    for (i, marker) in markers.visible_mut().enumerate() {
        let color = &mut marker.color;
        let hue = root_hue + (i % n) as f64 * step;
        color.set_hue(remapper.to_scientific(wrap(hue))?);
        color.set_saturation(1.0 - OFFSET_FACTOR * (i / n) as f64);
        color.set_value(1.0);
    }
    Ok(())
}

/// Rotate the visible markers by `delta` artistic degrees during a drag.
///
/// Each marker turns from its own `starting_hue`. The marker under the
/// pointer (visible position `dragged`) is skipped since its color follows
/// the pointer directly. In analogous mode the rotation is scaled by
/// `d(i) / d(dragged)` so the fan opens and closes around the root;
/// dragging the root itself rotates everything rigidly.
pub fn rotate_harmony(
    mode: Mode,
    markers: &mut MarkerSet,
    dragged: usize,
    delta: f64,
    remapper: &HueRemapper,
) -> Result<(), DomainError> {
    if mode == Mode::Custom {
        return Ok(());
    }
    let dragged_distance = distance_from_root(dragged);

    for (i, marker) in markers.visible_mut().enumerate() {
        if mode == Mode::Shades {
            marker.color.set_saturation(1.0);
        }
        if i == dragged {
            continue;
        }
        let start = match marker.starting_hue {
            Some(h) => h,
            None => remapper.to_artistic(marker.color.hue())?,
        };
        let scale = if mode == Mode::Analogous && dragged_distance != 0 {
            distance_from_root(i) as f64 / dragged_distance as f64
        } else {
            1.0
        };
        marker
            .color
            .set_hue(remapper.to_scientific(wrap(start + scale * delta))?);
    }
    Ok(())
}

/// Hue arithmetic helper: lift by two turns before wrapping.
fn wrap(hue: f64) -> f64 {
    normalize_hue(hue + 2.0 * FULL_TURN)
}
