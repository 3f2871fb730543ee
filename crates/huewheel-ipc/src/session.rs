//! Dispatches host messages to a [`ColorWheelPicker`].

use std::cell::RefCell;
use std::rc::Rc;

use huewheel_core::{
    BindData, ColorWheelPicker, Marker, PickerConfig, PickerError, PickerEvent,
};

use crate::IpcError;
use crate::messages::{MarkerSpec, PickerToUi, UiToPicker};

/// One host connection driving one picker.
///
/// Picker notifications raised while handling a message are turned into
/// outgoing messages, in the order they were raised, after any direct
/// reply.
#[derive(Debug)]
pub struct PickerSession {
    picker: ColorWheelPicker,
    pending: Rc<RefCell<Vec<PickerEvent>>>,
}

impl PickerSession {
    pub fn new(config: PickerConfig) -> Result<Self, PickerError> {
        Ok(Self::with_picker(ColorWheelPicker::new(config)?))
    }

    pub fn with_picker(mut picker: ColorWheelPicker) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        picker.subscribe(move |event: &PickerEvent| sink.borrow_mut().push(*event));
        Self { picker, pending }
    }

    pub fn picker(&self) -> &ColorWheelPicker {
        &self.picker
    }

    /// Handle one message. Rejected requests produce a
    /// [`PickerToUi::Error`] reply instead of failing the session.
    pub fn handle(&mut self, message: UiToPicker) -> Vec<PickerToUi> {
        let mut out = match self.dispatch(message) {
            Ok(replies) => replies,
            Err(e) => {
                tracing::warn!("rejected host message: {e}");
                vec![PickerToUi::Error {
                    message: e.to_string(),
                }]
            }
        };
        out.extend(self.drain_events());
        out
    }

    /// Parse a JSON message, handle it, and serialize the replies.
    pub fn handle_json(&mut self, json: &str) -> Result<Vec<String>, IpcError> {
        let message: UiToPicker = serde_json::from_str(json)?;
        self.handle(message)
            .iter()
            .map(|reply| serde_json::to_string(reply).map_err(IpcError::from))
            .collect()
    }

    fn dispatch(&mut self, message: UiToPicker) -> Result<Vec<PickerToUi>, PickerError> {
        match message {
            UiToPicker::RequestState => Ok(vec![PickerToUi::Initialize {
                mode: self.picker.mode(),
                view_box: self.picker.config().view_box(),
                markers: self.picker.snapshot()?,
            }]),
            UiToPicker::DragStart => {
                self.picker.drag_start()?;
                Ok(Vec::new())
            }
            UiToPicker::DragMove { x, y, marker } => {
                self.picker.drag_move(x, y, marker)?;
                Ok(Vec::new())
            }
            UiToPicker::DragEnd => {
                self.picker.drag_end()?;
                Ok(Vec::new())
            }
            UiToPicker::DragCancel => {
                self.picker.drag_cancel();
                Ok(Vec::new())
            }
            UiToPicker::SetMode { mode } => {
                self.picker.set_mode_named(&mode)?;
                Ok(Vec::new())
            }
            UiToPicker::BindCount { count } => {
                self.picker.bind(BindData::from_count(count))?;
                Ok(Vec::new())
            }
            UiToPicker::BindMarkers { markers } => {
                let markers = markers
                    .iter()
                    .map(|spec| self.marker_from_spec(spec))
                    .collect::<Result<Vec<_>, _>>()?;
                self.picker.bind(BindData::Markers(markers))?;
                Ok(Vec::new())
            }
            UiToPicker::ExportColors { format } => Ok(vec![PickerToUi::Colors {
                format,
                colors: self.picker.colors_as(format),
            }]),
        }
    }

    fn marker_from_spec(&self, spec: &MarkerSpec) -> Result<Marker, PickerError> {
        self.picker
            .create_marker(&spec.color, spec.name.clone(), spec.visible)
    }

    fn drain_events(&mut self) -> Vec<PickerToUi> {
        let events: Vec<PickerEvent> = self.pending.borrow_mut().drain(..).collect();
        events
            .into_iter()
            .filter_map(|event| match event {
                PickerEvent::MarkersUpdated => Some(match self.picker.snapshot() {
                    Ok(markers) => PickerToUi::MarkersUpdated { markers },
                    Err(e) => PickerToUi::Error {
                        message: e.to_string(),
                    },
                }),
                PickerEvent::ModeChanged(mode) => Some(PickerToUi::ModeChanged { mode }),
                PickerEvent::UpdateEnd => Some(PickerToUi::UpdateEnd),
                // Hosts learn about new markers from the MarkersUpdated that follows.
                PickerEvent::BindData => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huewheel_core::{ColorFormat, Mode};

    fn session() -> PickerSession {
        let picker = ColorWheelPicker::with_seed(PickerConfig::default(), 3).unwrap();
        PickerSession::with_picker(picker)
    }

    #[test]
    fn test_request_state_replies_initialize() {
        let mut s = session();
        let out = s.handle(UiToPicker::RequestState);
        assert_eq!(out.len(), 1);
        match &out[0] {
            PickerToUi::Initialize {
                mode,
                view_box,
                markers,
            } => {
                assert_eq!(*mode, Mode::Analogous);
                assert_eq!(*view_box, [-20.0, -20.0, 390.0, 390.0]);
                assert_eq!(markers.len(), 1);
                assert!(markers[0].is_root);
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_set_mode_forwards_events() {
        let mut s = session();
        let out = s.handle(UiToPicker::SetMode {
            mode: "tetrad".into(),
        });
        assert!(matches!(out[0], PickerToUi::MarkersUpdated { .. }));
        assert_eq!(out[1], PickerToUi::UpdateEnd);
        assert_eq!(out[2], PickerToUi::ModeChanged { mode: Mode::Tetrad });
    }

    #[test]
    fn test_invalid_mode_becomes_error_reply() {
        let mut s = session();
        let out = s.handle(UiToPicker::SetMode {
            mode: "Pentad".into(),
        });
        assert_eq!(
            out,
            vec![PickerToUi::Error {
                message: "invalid mode specified: Pentad".into()
            }]
        );
        assert_eq!(s.picker().mode(), Mode::Analogous);
    }

    #[test]
    fn test_negative_count_binds_nothing() {
        let mut s = session();
        s.handle(UiToPicker::BindCount { count: -4 });
        assert!(s.picker().markers().is_empty());
    }

    #[test]
    fn test_bad_marker_spec_rejects_whole_bind() {
        let mut s = session();
        let out = s.handle(UiToPicker::BindMarkers {
            markers: vec![
                MarkerSpec {
                    color: "#123456".into(),
                    name: None,
                    visible: true,
                },
                MarkerSpec {
                    color: "chartreuse-ish".into(),
                    name: None,
                    visible: true,
                },
            ],
        });
        assert!(matches!(out.as_slice(), [PickerToUi::Error { .. }]));
        assert_eq!(s.picker().markers().len(), 1);
        assert_eq!(s.picker().mode(), Mode::Analogous);
    }

    #[test]
    fn test_export_colors() {
        let mut s = session();
        let out = s.handle(UiToPicker::ExportColors {
            format: ColorFormat::Hex,
        });
        assert_eq!(
            out,
            vec![PickerToUi::Colors {
                format: ColorFormat::Hex,
                colors: vec!["#ff0000".into()],
            }]
        );
    }
}
