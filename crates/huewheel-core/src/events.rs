//! Notifications emitted by the picker.
//!
//! Hosts subscribe a [`PickerObserver`] to redraw markers, reflect the
//! current mode, or persist a finished palette. The set of notifications is
//! fixed; there is no string-keyed event bus.

use crate::harmony::Mode;

/// A picker state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// Marker colors or positions changed; redraw.
    MarkersUpdated,
    /// The harmony mode changed.
    ModeChanged(Mode),
    /// A new set of markers was bound.
    BindData,
    /// The picker reached a logically complete state (end of a drag, mode
    /// switch, or bind). Good moment to export or persist.
    UpdateEnd,
}

/// Receives [`PickerEvent`]s in the order they happen.
pub trait PickerObserver {
    fn on_event(&mut self, event: &PickerEvent);
}

impl<F> PickerObserver for F
where
    F: FnMut(&PickerEvent),
{
    fn on_event(&mut self, event: &PickerEvent) {
        self(event)
    }
}
