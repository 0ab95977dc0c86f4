//! Errors raised at the session boundary.

/// Failures reported by a [`super::GameSession`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The game process is gone or the attachment was lost.
    #[error("game session detached")]
    Detached,

    /// The game refused a command, usually because the snapshot it was based
    /// on went stale (target moved out of range, recast not actually ready).
    #[error("'{ability}' rejected: {reason}")]
    Rejected { ability: String, reason: String },

    /// Movement could not be issued.
    #[error("navigation failed: {0}")]
    Navigation(String),
}

impl SessionError {
    pub fn rejected(ability: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            ability: ability.into(),
            reason: reason.into(),
        }
    }

    /// Fatal errors end the current run; everything else is retried by the
    /// next tick's re-evaluation.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Detached)
    }
}
