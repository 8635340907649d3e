/*
[INPUT]:  Backend errors, local validation failures, flow gating
[OUTPUT]: FlowError with coarse kinds for user-facing messages
[POS]:    Error handling layer - application-level errors
[UPDATE]: When flow operations gain new failure modes
*/

use task_cloner_adapter::{ClonerError, ErrorKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    /// Rejected locally before any suspension
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] ClonerError),

    /// Same operation already in flight
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// Reset while the operation was suspended
    #[error("operation cancelled by reset")]
    Cancelled,

    #[error("no task has been imported")]
    NoTask,
}

impl FlowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlowError::Validation(_) | FlowError::NoTask => ErrorKind::Validation,
            FlowError::Backend(err) => err.kind(),
            FlowError::Busy(_) | FlowError::Cancelled => ErrorKind::Internal,
        }
    }
}
