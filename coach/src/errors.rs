use thiserror::Error;

use crate::state::SessionPhase;

/// Reasons a session refuses a request. None of them are fatal to the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session is busy ({0:?})")]
    Busy(SessionPhase),

    #[error("Session already holds an analysis; start a new session for a new video")]
    AlreadyAnalyzed,

    #[error("No swing has been analyzed in this session yet")]
    NotAnalyzed,

    #[error("Message is empty")]
    EmptyInput,
}

pub type SessionResult<T> = Result<T, SessionError>;
