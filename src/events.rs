//! Host-facing event types
//!
//! `InputEvent` is the inbound feed: the host forwards document-level clicks
//! and key presses, identifying targets by element id. `ServiceEvent` is the
//! outbound lifecycle stream, delivered over the unbounded channel configured
//! with `DialogService::set_event_sender`.

use crate::dialog::types::{DialogId, DialogKind};
use serde::Serialize;

/// Keys the service reacts to. Hosts only need to forward these two; all
/// other keyboard input stays host-side (text editing happens in the host's
/// own field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
}

/// A document-level input event forwarded by the host.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A click whose `target` is the id of the exact element hit, not an
    /// enclosing ancestor.
    Click { target: String },

    /// A key press; `target` is the id of the focused element, when any.
    Key { key: Key, target: Option<String> },
}

/// Lifecycle notification emitted by the service.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServiceEvent {
    /// A dialog was mounted and its entry transition scheduled.
    Opened { id: DialogId, kind: DialogKind },

    /// A dialog's resolver fired; its node stays mounted until the removal
    /// delay elapses.
    Resolved { id: DialogId, confirmed: bool },

    /// A dialog's node was removed from the surface.
    Removed { id: DialogId },
}

impl ServiceEvent {
    /// JSON form of the event, for hosts that bridge notifications across a
    /// language boundary.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
