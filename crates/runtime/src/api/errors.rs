//! Unified error types surfaced by the engine API.
//!
//! Wraps failures from worker coordination and the game session so hosts can
//! bubble them up with consistent context.
use farm_core::SessionError;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no session attached")]
    NoSession,

    #[error("engine requires an action catalog before building")]
    MissingCatalog,

    #[error("engine worker command channel closed")]
    CommandChannelClosed,

    #[error("engine worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("engine worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
