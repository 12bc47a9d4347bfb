//! Session state owned by one form instance.
//!
//! `SessionState` is the only mutable state of the workflow. It is created
//! per session, mutated exclusively by `core::reducer::reduce`, and read by
//! the rendering layer. The workflow phase is derived from the flags and
//! never stored.

use strum::Display;

use crate::domain::FieldRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WorkflowPhase {
    Idle,
    Confirming,
    Sending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub record: FieldRecord,
    /// A submission is in flight. Guards against a second send.
    pub submitting: bool,
    /// The review overlay is open.
    pub confirmation_visible: bool,
    pub dark_mode: bool,
    pub quit_requested: bool,
}

impl SessionState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> WorkflowPhase {
        if self.submitting {
            WorkflowPhase::Sending
        } else if self.confirmation_visible {
            WorkflowPhase::Confirming
        } else {
            WorkflowPhase::Idle
        }
    }

    /// Whether the send action is currently accepted.
    pub fn can_send(&self) -> bool {
        self.phase() == WorkflowPhase::Confirming
    }
}
