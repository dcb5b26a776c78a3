//! Lifecycle events: everything the presentation and notification
//! collaborators learn about an application arrives as one of these.

use crate::{
    application::Decision,
    types::{ApplicationId, Millis, SessionId},
};
use serde::{Deserialize, Serialize};

/// Variants are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecisionEvent {
    ApplicationSubmitted {
        at:             Millis,
        application_id: ApplicationId,
        sequence:       u64,
        resolve_at:     Millis,
    },
    ApplicationResolved {
        at:             Millis,
        application_id: ApplicationId,
        decision:       Decision,
        policy:         String,
    },
    ResolutionCancelled {
        at:             Millis,
        application_id: ApplicationId,
    },
}

impl DecisionEvent {
    /// Stable name, used for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ApplicationSubmitted { .. } => "application_submitted",
            Self::ApplicationResolved { .. }  => "application_resolved",
            Self::ResolutionCancelled { .. }  => "resolution_cancelled",
        }
    }

    pub fn application_id(&self) -> ApplicationId {
        match self {
            Self::ApplicationSubmitted { application_id, .. }
            | Self::ApplicationResolved { application_id, .. }
            | Self::ResolutionCancelled { application_id, .. } => *application_id,
        }
    }
}

/// One entry of a session's in-memory event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub at:         Millis,
    pub session_id: SessionId,
    pub event_type: String,
    pub payload:    String, // JSON-serialized DecisionEvent
}
