//! The color wheel picker: markers, mode, and drag handling in one place.
//!
//! This is the surface a host wires to its input and rendering layers.
//! Every mutating call validates first, mutates second, and then notifies
//! subscribed observers.

use glam::DVec2;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorFormat};
use crate::config::PickerConfig;
use crate::drag::DragController;
use crate::error::PickerError;
use crate::events::{PickerEvent, PickerObserver};
use crate::geometry::WheelGeometry;
use crate::harmony::{Mode, apply_harmony};
use crate::markers::{BindData, Marker, MarkerSet};

/// Read-only render data for one marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    /// Position in the full marker list.
    pub index: usize,
    pub name: Option<String>,
    pub visible: bool,
    pub is_root: bool,
    /// Center of the marker in wheel pixel space.
    pub x: f64,
    pub y: f64,
    /// Marker fill: the color at full value.
    pub fill: String,
    /// The marker's actual color.
    pub hex: String,
    pub color: Color,
    /// Labels are hidden while in shades mode.
    pub label_visible: bool,
}

/// Harmony-driven palette picker on a hue/saturation wheel.
pub struct ColorWheelPicker {
    config: PickerConfig,
    geometry: WheelGeometry,
    markers: MarkerSet,
    mode: Mode,
    slice: f64,
    default_color: Color,
    drag: DragController,
    rng: StdRng,
    observers: Vec<Box<dyn PickerObserver>>,
}

impl std::fmt::Debug for ColorWheelPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorWheelPicker")
            .field("mode", &self.mode)
            .field("slice", &self.slice)
            .field("markers", &self.markers)
            .field("drag", &self.drag.state())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ColorWheelPicker {
    /// Create a picker and bind `config.initial_count` markers.
    pub fn new(config: PickerConfig) -> Result<Self, PickerError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Like [`Self::new`] but with reproducible jitter.
    pub fn with_seed(config: PickerConfig, seed: u64) -> Result<Self, PickerError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PickerConfig, rng: StdRng) -> Result<Self, PickerError> {
        config.validate()?;
        let default_color = Color::from_hex(&config.initial_root)?;
        let mut picker = Self {
            geometry: WheelGeometry::new(config.radius),
            markers: MarkerSet::new(),
            mode: config.initial_mode,
            slice: config.default_slice,
            default_color,
            drag: DragController::new(),
            rng,
            observers: Vec::new(),
            config,
        };
        picker.bind(BindData::Count(picker.config.initial_count))?;
        Ok(picker)
    }

    pub fn subscribe(&mut self, observer: impl PickerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: PickerEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Analogous spacing in artistic degrees.
    pub fn slice(&self) -> f64 {
        self.slice
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Build a marker from any `#rgb`/`#rrggbb` color string.
    pub fn create_marker(
        &self,
        color: &str,
        name: Option<String>,
        visible: bool,
    ) -> Result<Marker, PickerError> {
        Ok(Marker::new(Color::from_hex(color)?, name, visible))
    }

    /// Replace all markers.
    ///
    /// An explicit marker list is user-authored, so it switches the picker
    /// to [`Mode::Custom`]. A count keeps the current mode and lays the new
    /// markers out under it.
    pub fn bind(&mut self, data: BindData) -> Result<(), PickerError> {
        let previous_mode = self.mode;
        if matches!(data, BindData::Markers(_)) {
            self.mode = Mode::Custom;
        }
        if self.drag.is_dragging() {
            self.drag.cancel(&mut self.markers);
        }
        self.markers.bind(data, self.default_color);
        self.reharmonize()?;
        tracing::info!(
            markers = self.markers.len(),
            mode = %self.mode,
            "bound palette"
        );

        self.emit(PickerEvent::BindData);
        self.emit(PickerEvent::MarkersUpdated);
        self.emit(PickerEvent::UpdateEnd);
        if self.mode != previous_mode {
            self.emit(PickerEvent::ModeChanged(self.mode));
        }
        Ok(())
    }

    /// Bind `config.default_count` markers at the default color.
    pub fn bind_default(&mut self) -> Result<(), PickerError> {
        self.bind(BindData::Count(self.config.default_count))
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), PickerError> {
        self.mode = mode;
        self.reharmonize()?;
        tracing::info!(%mode, "harmony mode changed");
        self.emit(PickerEvent::MarkersUpdated);
        self.emit(PickerEvent::UpdateEnd);
        self.emit(PickerEvent::ModeChanged(mode));
        Ok(())
    }

    /// Parse and switch to a mode by name. Unknown names leave the picker
    /// untouched.
    pub fn set_mode_named(&mut self, name: &str) -> Result<(), PickerError> {
        let mode = name.parse::<Mode>().inspect_err(|e| tracing::warn!("{e}"))?;
        self.set_mode(mode)
    }

    /// Change the analogous spacing and re-derive the palette.
    pub fn set_slice(&mut self, slice: f64) -> Result<(), PickerError> {
        if !slice.is_finite() {
            return Err(PickerError::Config(format!("slice must be finite, got {slice}")));
        }
        self.slice = slice;
        self.reharmonize()?;
        self.emit(PickerEvent::MarkersUpdated);
        self.emit(PickerEvent::UpdateEnd);
        Ok(())
    }

    /// Overwrite one marker's color, then re-derive the palette.
    ///
    /// Under a harmony mode the non-root markers follow the root, so in
    /// practice only a root change sticks.
    pub fn set_marker_color(&mut self, index: usize, color: Color) -> Result<(), PickerError> {
        let len = self.markers.len();
        let marker = self
            .markers
            .get_mut(index)
            .ok_or(PickerError::MarkerOutOfRange { index, len })?;
        marker.color = color;
        self.reharmonize()?;
        self.emit(PickerEvent::MarkersUpdated);
        self.emit(PickerEvent::UpdateEnd);
        Ok(())
    }

    /// Show or hide a marker. Visibility changes shift harmony roles, so
    /// the palette is re-derived.
    pub fn set_marker_visible(&mut self, index: usize, visible: bool) -> Result<(), PickerError> {
        let len = self.markers.len();
        let marker = self
            .markers
            .get_mut(index)
            .ok_or(PickerError::MarkerOutOfRange { index, len })?;
        marker.visible = visible;
        self.reharmonize()?;
        self.emit(PickerEvent::MarkersUpdated);
        self.emit(PickerEvent::UpdateEnd);
        Ok(())
    }

    pub fn drag_start(&mut self) -> Result<(), PickerError> {
        self.drag.start(&mut self.markers, self.geometry.remapper())
    }

    /// Pointer moved to `(x, y)` in wheel pixel space while dragging marker
    /// `index` (position in the full marker list).
    pub fn drag_move(&mut self, x: f64, y: f64, index: usize) -> Result<(), PickerError> {
        self.drag.update(
            &mut self.markers,
            &self.geometry,
            self.mode,
            DVec2::new(x, y),
            index,
        )?;
        self.emit(PickerEvent::MarkersUpdated);
        Ok(())
    }

    pub fn drag_end(&mut self) -> Result<(), PickerError> {
        if let Some(slice) = self
            .drag
            .end(&mut self.markers, self.mode, self.geometry.remapper())?
        {
            self.slice = slice;
        }
        self.emit(PickerEvent::UpdateEnd);
        Ok(())
    }

    /// Abort the current gesture, restoring the pre-drag palette.
    pub fn drag_cancel(&mut self) {
        let was_dragging = self.drag.is_dragging();
        self.drag.cancel(&mut self.markers);
        if was_dragging {
            self.emit(PickerEvent::MarkersUpdated);
        }
    }

    fn reharmonize(&mut self) -> Result<(), PickerError> {
        apply_harmony(
            self.mode,
            &mut self.markers,
            self.slice,
            self.geometry.remapper(),
            &mut self.rng,
        )?;
        Ok(())
    }

    /// Render data for every marker, hidden ones included.
    pub fn snapshot(&self) -> Result<Vec<MarkerView>, PickerError> {
        let root = self.markers.iter().position(|m| m.visible);
        self.markers
            .iter()
            .enumerate()
            .map(|(index, m)| -> Result<MarkerView, PickerError> {
                let p = self
                    .geometry
                    .hs_to_pixel(m.color.hue(), m.color.saturation())?;
                Ok(MarkerView {
                    index,
                    name: m.name.clone(),
                    visible: m.visible,
                    is_root: root == Some(index),
                    x: p.x,
                    y: p.y,
                    fill: m.color.at_full_value().to_hex_string(),
                    hex: m.color.to_hex_string(),
                    color: m.color,
                    label_visible: self.mode != Mode::Shades,
                })
            })
            .collect()
    }

    /// Visible colors sorted by ascending scientific hue.
    pub fn colors(&self) -> Vec<Color> {
        let mut colors: Vec<Color> = self.markers.visible().map(|m| m.color).collect();
        colors.sort_by(|a, b| a.hue().total_cmp(&b.hue()));
        colors
    }

    pub fn colors_as(&self, format: ColorFormat) -> Vec<String> {
        self.colors().iter().map(|c| c.format(format)).collect()
    }

    pub fn colors_as_hex(&self) -> Vec<String> {
        self.colors_as(ColorFormat::Hex)
    }

    pub fn colors_as_rgb(&self) -> Vec<String> {
        self.colors_as(ColorFormat::Rgb)
    }

    pub fn colors_as_hsl(&self) -> Vec<String> {
        self.colors_as(ColorFormat::Hsl)
    }

    pub fn colors_as_hsv(&self) -> Vec<String> {
        self.colors_as(ColorFormat::Hsv)
    }
}
