//! Financial decision engine: loan amortization, heuristic eligibility
//! scoring, and a simulated loan-application lifecycle.
//!
//! Everything is in-memory and ephemeral. The presentation layer feeds
//! typed inputs in and renders the plain data that comes back.

pub mod amortization;
pub mod application;
pub mod clock;
pub mod command;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod event;
pub mod funding;
pub mod lifecycle;
pub mod notice;
pub mod policy;
pub mod request;
pub mod rng;
pub mod timer;
pub mod types;

pub use amortization::{AmortizationResult, LoanTerms, PaymentRow};
pub use application::{Application, ApplicationStatus, Decision};
pub use config::DecisionConfig;
pub use eligibility::{BusinessProfile, EligibilityResult, EligibilityScorer, InsightKey, Rating};
pub use engine::DecisionEngine;
pub use error::{DecisionError, DecisionResult};
pub use lifecycle::ApplicationSession;
pub use policy::{FixedPolicy, ResolutionPolicy, UniformPolicy};
pub use request::LoanRequest;
