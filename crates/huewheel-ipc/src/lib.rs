//! Host ↔ picker message contracts for Huewheel.
//!
//! A host UI (web view, native toolkit, remote client) talks to a
//! [`PickerSession`] by exchanging JSON messages. The enums follow the
//! `#[serde(tag = "type", content = "data")]` convention so every message
//! is `{"type": "...", "data": {...}}`.

pub mod messages;
pub mod session;

pub use messages::{MarkerSpec, PickerToUi, UiToPicker};
pub use session::PickerSession;

/// Errors that can occur while handling host messages.
///
/// Requests the picker rejects are not errors at this level; they come
/// back as [`PickerToUi::Error`] replies.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}
