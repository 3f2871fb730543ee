//! Palette markers and the ordered set that owns them.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A single draggable color on the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: Color,
    #[serde(default)]
    pub name: Option<String>,
    pub visible: bool,
    /// Artistic hue captured when a drag starts; cleared when it ends.
    #[serde(skip)]
    pub starting_hue: Option<f64>,
}

impl Marker {
    pub fn new(color: Color, name: Option<String>, visible: bool) -> Self {
        Self {
            color,
            name,
            visible,
            starting_hue: None,
        }
    }
}

/// What to bind a [`MarkerSet`] to.
#[derive(Debug, Clone, PartialEq)]
pub enum BindData {
    /// An explicit, user-authored list of markers.
    Markers(Vec<Marker>),
    /// `n` visible markers at the default color.
    Count(usize),
}

impl BindData {
    /// A count from an untyped source; negative counts bind nothing.
    pub fn from_count(count: i64) -> Self {
        Self::Count(usize::try_from(count).unwrap_or(0))
    }
}

/// Ordered markers; the first visible one is the root.
///
/// Order matters: harmony rules key on each marker's position among the
/// visible markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every marker. `Count` markers start at `default_color`.
    pub fn bind(&mut self, data: BindData, default_color: Color) {
        self.markers = match data {
            BindData::Markers(markers) => markers
                .into_iter()
                .map(|m| Marker {
                    starting_hue: None,
                    ..m
                })
                .collect(),
            BindData::Count(n) => (0..n)
                .map(|_| Marker::new(default_color, None, true))
                .collect(),
        };
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Marker> {
        self.markers.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// The first visible marker, if any.
    pub fn root(&self) -> Option<&Marker> {
        self.markers.iter().find(|m| m.visible)
    }

    /// Visible markers in order.
    pub fn visible(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|m| m.visible)
    }

    pub fn visible_mut(&mut self) -> impl Iterator<Item = &mut Marker> {
        self.markers.iter_mut().filter(|m| m.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Position of marker `index` among the visible markers, or `None` if
    /// it is hidden or out of range.
    pub fn visible_position(&self, index: usize) -> Option<usize> {
        let marker = self.markers.get(index)?;
        if !marker.visible {
            return None;
        }
        Some(self.markers[..index].iter().filter(|m| m.visible).count())
    }

    pub fn clear_starting_hues(&mut self) {
        for marker in &mut self.markers {
            marker.starting_hue = None;
        }
    }
}

/// Offset of visible position `i` from the root in analogous layouts.
///
/// ```text
///   i:         0  1   2  3   4  5 ...
///   distance:  0  1  -1  2  -2  3 ...
/// ```
pub fn distance_from_root(i: usize) -> i64 {
    let magnitude = i.div_ceil(2) as i64;
    if i % 2 == 1 { magnitude } else { -magnitude }
}
