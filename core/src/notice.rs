//! Human-readable text for the notification and status-panel collaborators.

use crate::{
    application::{ApplicationStatus, Decision},
    event::DecisionEvent,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Destructive,
}

/// A toast-style message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title:       String,
    pub description: String,
    pub tone:        Tone,
}

impl Notice {
    fn new(title: &str, description: &str, tone: Tone) -> Self {
        Self {
            title:       title.into(),
            description: description.into(),
            tone,
        }
    }

    /// Cancelled resolutions are silent.
    pub fn for_event(event: &DecisionEvent) -> Option<Self> {
        match event {
            DecisionEvent::ApplicationSubmitted { .. } => Some(Self::new(
                "Application Submitted",
                "Your loan application has been received and is being processed.",
                Tone::Info,
            )),
            DecisionEvent::ApplicationResolved { decision: Decision::Approved, .. } => {
                Some(Self::new(
                    "Application Approved!",
                    "Congratulations! Your loan application has been approved.",
                    Tone::Success,
                ))
            }
            DecisionEvent::ApplicationResolved { decision: Decision::Rejected, .. } => {
                Some(Self::new(
                    "Application Not Approved",
                    "Unfortunately, your loan application was not approved at this time.",
                    Tone::Destructive,
                ))
            }
            DecisionEvent::ResolutionCancelled { .. } => None,
        }
    }
}

/// Headline and detail shown in the application status panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusGuidance {
    pub headline: &'static str,
    pub detail:   &'static str,
    /// Whether alternative financing options should be listed.
    pub show_alternatives: bool,
}

impl ApplicationStatus {
    pub fn guidance(&self) -> StatusGuidance {
        match self {
            Self::Idle => StatusGuidance {
                headline: "Apply for business funding",
                detail: "Complete the loan application form to check your eligibility and \
                         explore financing options tailored for women entrepreneurs.",
                show_alternatives: false,
            },
            Self::Pending => StatusGuidance {
                headline: "Your application is being reviewed",
                detail: "Our team is currently reviewing your application. \
                         You will receive an update soon.",
                show_alternatives: false,
            },
            Self::Approved => StatusGuidance {
                headline: "Your loan has been approved!",
                detail: "Congratulations! Your loan application has been approved. \
                         A team member will contact you with next steps.",
                show_alternatives: false,
            },
            Self::Rejected => StatusGuidance {
                headline: "Your application was not approved",
                detail: "Unfortunately, we couldn't approve your application at this time. \
                         Please review the alternative financing options below.",
                show_alternatives: true,
            },
        }
    }
}
