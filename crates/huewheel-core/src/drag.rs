//! Drag gesture state machine.
//!
//! ```text
//!   Idle ──start──→ Dragging ──update*──→ Dragging ──end/cancel──→ Idle
//! ```
//!
//! `start` snapshots each visible marker's artistic hue into
//! `starting_hue`. Every `update` moves the dragged marker to the (clamped)
//! pointer and rotates the others from their snapshots by the signed angle
//! between the pointer and the dragged marker's snapshot. `end` drops the
//! snapshots and, in analogous mode, measures the new spacing.

use glam::DVec2;

use crate::color::Color;
use crate::error::PickerError;
use crate::geometry::WheelGeometry;
use crate::harmony::{Mode, rotate_harmony};
use crate::hue::{FULL_TURN, HueRemapper, normalize_hue};
use crate::markers::MarkerSet;

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Tracks one drag gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    /// Colors at gesture start, restored on cancel.
    saved: Vec<Color>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Begin a gesture: snapshot every visible marker's artistic hue.
    pub fn start(
        &mut self,
        markers: &mut MarkerSet,
        remapper: &HueRemapper,
    ) -> Result<(), PickerError> {
        let hues = markers
            .visible()
            .map(|m| remapper.to_artistic(m.color.hue()))
            .collect::<Result<Vec<_>, _>>()?;
        for (marker, hue) in markers.visible_mut().zip(hues) {
            marker.starting_hue = Some(hue);
        }
        self.saved = markers.iter().map(|m| m.color).collect();
        self.state = DragState::Dragging;
        tracing::debug!("drag started with {} visible markers", self.saved.len());
        Ok(())
    }

    /// Move marker `index` (position in the full marker list) to `pixel`
    /// and redistribute the rest under `mode`.
    pub fn update(
        &mut self,
        markers: &mut MarkerSet,
        geometry: &WheelGeometry,
        mode: Mode,
        pixel: DVec2,
        index: usize,
    ) -> Result<(), PickerError> {
        if !pixel.is_finite() {
            return Err(PickerError::InvalidPointer {
                x: pixel.x,
                y: pixel.y,
            });
        }
        let dragged = match markers.get(index) {
            None => {
                return Err(PickerError::MarkerOutOfRange {
                    index,
                    len: markers.len(),
                });
            }
            Some(m) if !m.visible => return Err(PickerError::MarkerHidden(index)),
            Some(_) => markers.visible_position(index).unwrap_or(0),
        };
        if !self.is_dragging() {
            tracing::debug!("drag update without start, starting implicitly");
            self.start(markers, geometry.remapper())?;
        }

        let remapper = geometry.remapper();
        // pixel_to_hs saturates at the rim, so points outside the wheel land
        // on it without going through clamp_to_disk's trig round trip.
        let hs = geometry.pixel_to_hs(pixel)?;
        let drag_hue = geometry.pixel_angle(pixel);
        let Some(marker) = markers.get_mut(index) else {
            return Ok(());
        };
        let starting_hue = match marker.starting_hue {
            Some(h) => h,
            None => remapper.to_artistic(marker.color.hue())?,
        };
        marker.color.set_hue(hs.hue);
        marker.color.set_saturation(hs.saturation);

        let delta = signed_delta(starting_hue, drag_hue);
        rotate_harmony(mode, markers, dragged, delta, remapper)?;
        Ok(())
    }

    /// Finish the gesture. Returns the recalibrated analogous slice, if one
    /// was measured.
    pub fn end(
        &mut self,
        markers: &mut MarkerSet,
        mode: Mode,
        remapper: &HueRemapper,
    ) -> Result<Option<f64>, PickerError> {
        markers.clear_starting_hues();
        self.saved.clear();
        self.state = DragState::Idle;

        if mode != Mode::Analogous {
            return Ok(None);
        }
        let mut visible = markers.visible();
        let (Some(root), Some(neighbor)) = (visible.next(), visible.next()) else {
            return Ok(None);
        };
        let root_hue = remapper.to_artistic(root.color.hue())?;
        let neighbor_hue = remapper.to_artistic(neighbor.color.hue())?;
        let slice = normalize_hue(FULL_TURN + neighbor_hue - root_hue);
        tracing::debug!(slice, "analogous slice recalibrated");
        Ok(Some(slice))
    }

    /// Abort the gesture and put every marker back where it started.
    pub fn cancel(&mut self, markers: &mut MarkerSet) {
        if self.saved.len() == markers.len() {
            for (i, color) in self.saved.iter().enumerate() {
                if let Some(marker) = markers.get_mut(i) {
                    marker.color = *color;
                }
            }
        }
        markers.clear_starting_hues();
        self.saved.clear();
        self.state = DragState::Idle;
        tracing::debug!("drag cancelled");
    }
}

/// Shortest signed rotation from `starting_hue` to `drag_hue`, in degrees.
///
/// Counter-clockwise turns are positive; the result lies in `(-360, 360)`
/// and never exceeds 180 in magnitude except for float noise.
pub fn signed_delta(starting_hue: f64, drag_hue: f64) -> f64 {
    let theta1 = (FULL_TURN + starting_hue - drag_hue).rem_euclid(FULL_TURN);
    let theta2 = (FULL_TURN + drag_hue - starting_hue).rem_euclid(FULL_TURN);
    if theta1 < theta2 { -theta1 } else { theta2 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::apply_harmony;
    use crate::markers::BindData;

    const EPSILON: f64 = 1e-6;
    const RADIUS: f64 = 175.0;

    fn hue_diff(a: f64, b: f64) -> f64 {
        let d = (a - b).abs() % FULL_TURN;
        d.min(FULL_TURN - d)
    }

    fn analogous_set(root_hue: f64, n: usize, remap: &HueRemapper) -> MarkerSet {
        let mut set = MarkerSet::new();
        set.bind(BindData::Count(n), Color::new(root_hue, 1.0, 1.0));
        apply_harmony(Mode::Analogous, &mut set, 20.0, remap, &mut rand::rng()).unwrap();
        set
    }

    /// Pixel at artistic angle `deg` and radius fraction `s`.
    fn pixel_at(geometry: &WheelGeometry, deg: f64, s: f64) -> DVec2 {
        let t = deg.to_radians();
        geometry.centered_to_pixel(DVec2::new(t.cos(), t.sin()) * RADIUS * s)
    }

    #[test]
    fn test_signed_delta_picks_short_way() {
        assert!((signed_delta(10.0, 30.0) - 20.0).abs() < EPSILON);
        assert!((signed_delta(30.0, 10.0) + 20.0).abs() < EPSILON);
        assert!((signed_delta(350.0, 10.0) - 20.0).abs() < EPSILON);
        assert!((signed_delta(10.0, 350.0) + 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_start_snapshots_visible_only() {
        let remap = HueRemapper::default();
        let mut set = analogous_set(50.0, 3, &remap);
        set.get_mut(2).unwrap().visible = false;
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        assert!(drag.is_dragging());
        assert!(set.get(0).unwrap().starting_hue.is_some());
        assert!(set.get(1).unwrap().starting_hue.is_some());
        assert!(set.get(2).unwrap().starting_hue.is_none());
    }

    #[test]
    fn test_start_then_end_changes_nothing_but_snapshots() {
        let remap = HueRemapper::default();
        let mut set = analogous_set(50.0, 4, &remap);
        let before = set.clone();
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        drag.cancel(&mut set);
        assert_eq!(set, before);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_root_rotates_everything() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(100.0, 4, &remap);
        let r = remap.to_artistic(100.0).unwrap();
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        drag.update(&mut set, &geometry, Mode::Analogous, pixel_at(&geometry, r + 30.0, 0.5), 0)
            .unwrap();

        let root = set.get(0).unwrap();
        assert!(hue_diff(remap.to_artistic(root.color.hue()).unwrap(), r + 30.0) < EPSILON);
        assert!((root.color.saturation() - 0.5).abs() < EPSILON);
        let expected = [r + 30.0, r + 50.0, r + 10.0, r + 70.0];
        for (m, want) in set.visible().zip(expected) {
            let got = remap.to_artistic(m.color.hue()).unwrap();
            assert!(hue_diff(got, want) < EPSILON, "{got} vs {want}");
        }
    }

    #[test]
    fn test_pointer_outside_wheel_clamps_marker_not_angle() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(0.0, 2, &remap);
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        drag.update(&mut set, &geometry, Mode::Complementary, pixel_at(&geometry, 45.0, 3.0), 0)
            .unwrap();
        let root = set.get(0).unwrap();
        assert_eq!(root.color.saturation(), 1.0);
        let other = remap.to_artistic(set.get(1).unwrap().color.hue()).unwrap();
        // Marker 1 started at 20°, rotated by +45°.
        assert!(hue_diff(other, 65.0) < EPSILON, "{other}");
    }

    #[test]
    fn test_non_finite_pointer_rejected_before_mutating() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(100.0, 3, &remap);
        let before = set.clone();
        let mut drag = DragController::new();
        for pixel in [
            DVec2::new(f64::NAN, 100.0),
            DVec2::new(10.0, f64::INFINITY),
        ] {
            let err = drag
                .update(&mut set, &geometry, Mode::Analogous, pixel, 0)
                .unwrap_err();
            assert!(matches!(err, PickerError::InvalidPointer { .. }));
        }
        assert_eq!(set, before);
        assert!(!drag.is_dragging());

        drag.start(&mut set, &remap).unwrap();
        let err = drag
            .update(&mut set, &geometry, Mode::Analogous, DVec2::new(f64::NAN, 0.0), 1)
            .unwrap_err();
        assert!(matches!(err, PickerError::InvalidPointer { .. }));
        let slice = drag.end(&mut set, Mode::Analogous, &remap).unwrap().unwrap();
        assert!((slice - 20.0).abs() < EPSILON, "{slice}");
        for m in set.iter() {
            assert!((0.0..FULL_TURN).contains(&m.color.hue()));
        }
    }

    #[test]
    fn test_end_recalibrates_slice() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(100.0, 4, &remap);
        let r = remap.to_artistic(100.0).unwrap();
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        drag.update(&mut set, &geometry, Mode::Analogous, pixel_at(&geometry, r + 35.0, 1.0), 1)
            .unwrap();
        let slice = drag.end(&mut set, Mode::Analogous, &remap).unwrap().unwrap();
        assert!((slice - 35.0).abs() < EPSILON, "{slice}");
        assert!(set.iter().all(|m| m.starting_hue.is_none()));

        let expected = [r, r + 35.0, r - 35.0, r + 70.0];
        for (m, want) in set.visible().zip(expected) {
            let got = remap.to_artistic(m.color.hue()).unwrap();
            assert!(hue_diff(got, want) < EPSILON, "{got} vs {want}");
        }
    }

    #[test]
    fn test_end_without_neighbor_keeps_slice() {
        let remap = HueRemapper::default();
        let mut set = analogous_set(100.0, 1, &remap);
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        assert_eq!(drag.end(&mut set, Mode::Analogous, &remap).unwrap(), None);
        assert_eq!(drag.end(&mut set, Mode::Triad, &remap).unwrap(), None);
    }

    #[test]
    fn test_update_rejects_bad_index_before_mutating() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(100.0, 2, &remap);
        set.get_mut(1).unwrap().visible = false;
        let before = set.clone();
        let mut drag = DragController::new();
        let err = drag
            .update(&mut set, &geometry, Mode::Analogous, DVec2::ZERO, 5)
            .unwrap_err();
        assert_eq!(err, PickerError::MarkerOutOfRange { index: 5, len: 2 });
        let err = drag
            .update(&mut set, &geometry, Mode::Analogous, DVec2::ZERO, 1)
            .unwrap_err();
        assert_eq!(err, PickerError::MarkerHidden(1));
        assert_eq!(set, before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_cancel_restores_colors() {
        let geometry = WheelGeometry::new(RADIUS);
        let remap = geometry.remapper().clone();
        let mut set = analogous_set(100.0, 3, &remap);
        let before = set.clone();
        let mut drag = DragController::new();
        drag.start(&mut set, &remap).unwrap();
        drag.update(&mut set, &geometry, Mode::Analogous, pixel_at(&geometry, 200.0, 0.7), 0)
            .unwrap();
        assert_ne!(set, before);
        drag.cancel(&mut set);
        assert_eq!(set, before);
    }
}
