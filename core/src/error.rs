use crate::types::{ApplicationId, SessionId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("Invalid loan terms: {reason}")]
    InvalidTerms { reason: String },

    #[error("Invalid business profile: {reason}")]
    InvalidProfile { reason: String },

    #[error("Invalid application request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Application {pending} is still pending for this session")]
    AlreadySubmitted { pending: ApplicationId },

    #[error("Application {id} not found")]
    ApplicationNotFound { id: ApplicationId },

    #[error("Application {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id:   ApplicationId,
        from: String,
        to:   String,
    },

    #[error("Session '{session_id}' has been closed")]
    SessionClosed { session_id: SessionId },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DecisionResult<T> = Result<T, DecisionError>;

impl DecisionError {
    pub(crate) fn terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms { reason: reason.into() }
    }

    pub(crate) fn profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile { reason: reason.into() }
    }

    pub(crate) fn request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest { reason: reason.into() }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig { reason: reason.into() }
    }
}
