//! Wheel geometry: pixel ↔ centered Cartesian ↔ polar (hue, saturation).
//!
//! The wheel lives in an SVG-style pixel space of size `2r × 2r` with its
//! center at `(r, r)` and the y axis pointing down. Centered coordinates
//! put the origin at the wheel center with y pointing up, so angles follow
//! the usual counter-clockwise convention.
//!
//! ```text
//!   pixel (x, y) ──→ centered (x − r, r − y) ──→ θ = atan2, s = |p| / r
//!                                                 │
//!                                      artistic θ ──→ scientific hue
//! ```

use glam::DVec2;

use crate::error::DomainError;
use crate::hue::{FULL_TURN, HueRemapper, normalize_hue};

/// A hue (scientific, degrees) and saturation (`0..=1`) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueSat {
    pub hue: f64,
    pub saturation: f64,
}

/// Coordinate conversions for a wheel of a given pixel radius.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelGeometry {
    radius: f64,
    remapper: HueRemapper,
}

impl WheelGeometry {
    pub fn new(radius: f64) -> Self {
        Self::with_remapper(radius, HueRemapper::default())
    }

    pub fn with_remapper(radius: f64, remapper: HueRemapper) -> Self {
        Self { radius, remapper }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn remapper(&self) -> &HueRemapper {
        &self.remapper
    }

    /// Wheel center in pixel space.
    pub fn center(&self) -> DVec2 {
        DVec2::splat(self.radius)
    }

    pub fn pixel_to_centered(&self, pixel: DVec2) -> DVec2 {
        DVec2::new(pixel.x - self.radius, self.radius - pixel.y)
    }

    pub fn centered_to_pixel(&self, centered: DVec2) -> DVec2 {
        DVec2::new(centered.x + self.radius, self.radius - centered.y)
    }

    /// Pull a pixel point back onto the disk if it lies outside.
    ///
    /// Points inside (or on) the rim are returned unchanged; points outside
    /// are projected radially onto the rim, keeping their angle.
    pub fn clamp_to_disk(&self, pixel: DVec2) -> DVec2 {
        let p = self.pixel_to_centered(pixel);
        if p.length() <= self.radius {
            return pixel;
        }
        let theta = p.y.atan2(p.x);
        let rim = DVec2::new(theta.cos(), theta.sin()) * self.radius;
        self.centered_to_pixel(rim)
    }

    /// The raw polar angle of a pixel point, in artistic degrees `[0, 360)`.
    ///
    /// No disk clamping is applied: the angle of a point outside the wheel
    /// is the angle of the pointer itself.
    pub fn pixel_angle(&self, pixel: DVec2) -> f64 {
        let p = self.pixel_to_centered(pixel);
        normalize_hue(p.y.atan2(p.x).to_degrees() + 2.0 * FULL_TURN)
    }

    /// Position of a color with the given scientific hue and saturation.
    pub fn hs_to_pixel(&self, hue: f64, saturation: f64) -> Result<DVec2, DomainError> {
        let theta = self.remapper.to_artistic(hue)?.to_radians();
        let centered = DVec2::new(theta.cos(), theta.sin()) * self.radius * saturation;
        Ok(self.centered_to_pixel(centered))
    }

    /// Inverse of [`Self::hs_to_pixel`], saturating at the rim.
    pub fn pixel_to_hs(&self, pixel: DVec2) -> Result<HueSat, DomainError> {
        let p = self.pixel_to_centered(pixel);
        let artistic = normalize_hue(p.y.atan2(p.x).to_degrees() + FULL_TURN);
        Ok(HueSat {
            hue: self.remapper.to_scientific(artistic)?,
            saturation: (p.length() / self.radius).min(1.0),
        })
    }
}
