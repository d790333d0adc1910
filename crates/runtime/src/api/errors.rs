//! Unified error types surfaced by the runtime API.
//!
//! Gameplay results (rejected or failed casts) are not errors; they travel as
//! [`spell_core::CastOutcome`]. Errors here mean a command could not be
//! applied at all.
use thiserror::Error;
use tokio::sync::oneshot;

use spell_core::{ErrorSeverity, SelectionError, SpellError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("spell worker command channel closed")]
    CommandChannelClosed,

    #[error("spell worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("spell worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires host services to be configured before building")]
    MissingHost,

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

impl SpellError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Selection(err) => err.severity(),
            RuntimeError::MissingHost => ErrorSeverity::Content,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            RuntimeError::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            RuntimeError::MissingHost => "RUNTIME_MISSING_HOST",
            RuntimeError::Selection(err) => err.error_code(),
        }
    }
}
