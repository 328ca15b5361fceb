//! Per-instance bookkeeping

use crate::dialog::types::{DialogId, DialogRequest, Outcome};
use tokio::sync::oneshot;

/// Element ids derived from a dialog's instance id. The markup builder and
/// the trigger routing both use this derivation; hosts that address dialog
/// internals directly can recompute it from the id in an `Opened` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementIds {
    pub root: String,
    pub backdrop: String,
    pub panel: String,
    pub title: String,
    pub message: String,
    pub dismiss: String,
    pub confirm: String,
    pub cancel: String,
    pub input: String,
}

impl ElementIds {
    pub fn of(id: &DialogId) -> Self {
        let base = id.as_str();
        Self {
            root: base.to_string(),
            backdrop: format!("{}-backdrop", base),
            panel: format!("{}-panel", base),
            title: format!("{}-title", base),
            message: format!("{}-message", base),
            dismiss: format!("{}-dismiss", base),
            confirm: format!("{}-confirm", base),
            cancel: format!("{}-cancel", base),
            input: format!("{}-input", base),
        }
    }
}

/// How far along its lifecycle an instance is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InstanceState {
    /// Mounted, triggers live, resolver pending.
    Open,

    /// Resolved; the node stays mounted until the removal delay elapses.
    Closing,
}

/// One on-screen dialog awaiting exactly one decision.
pub(crate) struct DialogInstance {
    pub(crate) id: DialogId,
    pub(crate) request: DialogRequest,
    pub(crate) ids: ElementIds,
    pub(crate) state: InstanceState,
    resolver: Option<oneshot::Sender<Outcome>>,
}

impl DialogInstance {
    pub(crate) fn new(request: DialogRequest, resolver: oneshot::Sender<Outcome>) -> Self {
        let id = DialogId::generate();
        let ids = ElementIds::of(&id);
        Self {
            id,
            request,
            ids,
            state: InstanceState::Open,
            resolver: Some(resolver),
        }
    }

    /// Complete the pending result. The resolver is single-use; the send is
    /// a no-op if the caller already dropped its future.
    pub(crate) fn resolve(&mut self, outcome: Outcome) {
        if let Some(resolver) = self.resolver.take() {
            let _ = resolver.send(outcome);
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state == InstanceState::Open
    }
}
