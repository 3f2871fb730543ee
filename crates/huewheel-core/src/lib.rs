//! Huewheel Core — harmony engine for a hue/saturation wheel picker.
//!
//! Markers sit on a circular hue/saturation wheel. One of them, the root,
//! is dragged by the user; the others follow according to a harmony mode
//! (analogous, complementary, triad, tetrad, monochromatic, shades). This
//! crate contains the geometry, the hue remapping for the wheel image, the
//! per-mode rules and the drag state machine. No rendering or UI framework
//! dependencies.

pub mod color;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod geometry;
pub mod harmony;
pub mod hue;
pub mod markers;
pub mod picker;

// Re-exports for convenience.
pub use color::{Color, ColorFormat};
pub use config::PickerConfig;
pub use error::{DomainError, PickerError};
pub use events::{PickerEvent, PickerObserver};
pub use geometry::{HueSat, WheelGeometry};
pub use harmony::{Mode, apply_harmony, rotate_harmony};
pub use hue::HueRemapper;
pub use markers::{BindData, Marker, MarkerSet, distance_from_root};
pub use picker::{ColorWheelPicker, MarkerView};
