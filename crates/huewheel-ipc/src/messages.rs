//! IPC message contracts between a host UI and the picker.

use serde::{Deserialize, Serialize};

use huewheel_core::{ColorFormat, MarkerView, Mode};

/// A marker as described by the host when binding an explicit palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// `#rgb` or `#rrggbb`.
    pub color: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Messages from the host UI to the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToPicker {
    /// Request a full state snapshot after the UI connects.
    RequestState,

    /// A drag gesture began.
    DragStart,

    /// The pointer moved during a drag.
    DragMove {
        /// Pointer x in wheel pixel space.
        x: f64,
        /// Pointer y in wheel pixel space.
        y: f64,
        /// Index of the dragged marker in the full marker list.
        marker: usize,
    },

    /// The drag gesture finished.
    DragEnd,

    /// The drag gesture was aborted.
    DragCancel,

    /// Switch harmony mode by name.
    SetMode {
        /// One of the mode names, e.g. `"Triad"`.
        mode: String,
    },

    /// Replace the palette with `count` default markers.
    BindCount {
        /// Negative counts bind an empty palette.
        count: i64,
    },

    /// Replace the palette with explicit markers.
    BindMarkers {
        /// Markers in order; the first visible one becomes the root.
        markers: Vec<MarkerSpec>,
    },

    /// Ask for the palette as strings, sorted by hue.
    ExportColors {
        /// Requested string form.
        format: ColorFormat,
    },
}

/// Messages from the picker to the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PickerToUi {
    /// Full state, sent in reply to `RequestState`.
    Initialize {
        /// Current harmony mode.
        mode: Mode,
        /// SVG view box `[min_x, min_y, width, height]`.
        view_box: [f64; 4],
        /// Every marker, hidden ones included.
        markers: Vec<MarkerView>,
    },

    /// Marker colors or positions changed.
    MarkersUpdated {
        /// Every marker, hidden ones included.
        markers: Vec<MarkerView>,
    },

    /// The harmony mode changed.
    ModeChanged {
        /// The new mode.
        mode: Mode,
    },

    /// The picker reached a logically complete state.
    UpdateEnd,

    /// Exported palette.
    Colors {
        /// String form of `colors`.
        format: ColorFormat,
        /// Visible colors sorted by ascending hue.
        colors: Vec<String>,
    },

    /// A request was rejected.
    Error {
        /// Error description.
        message: String,
    },
}
