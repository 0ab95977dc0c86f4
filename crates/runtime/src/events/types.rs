//! Typed payloads carried by [`super::Event`].

use farm_core::UnitId;
use serde::{Deserialize, Serialize};

/// Engine lifecycle changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Polling resumed.
    Started,
    /// Polling halted on request. The active state has already exited.
    Stopped,
    /// The engine halted itself, e.g. because the player died.
    Paused { reason: String },
    /// A fatal session error ended the run.
    Faulted { error: String },
}

/// Behavior-state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateEvent {
    Entered { state: String },
    Exited { state: String },
}

/// Outcomes of executor dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// The game accepted the ability.
    Used {
        ability: String,
        target: Option<UnitId>,
    },
    /// The game refused the ability. Not retried; the next tick re-evaluates.
    Rejected { ability: String, reason: String },
}
