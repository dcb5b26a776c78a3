//! Resolution policies.
//!
//! RULE: A policy returns a Decision, never a status, so a resolved
//! application can only ever land in Approved or Rejected.
//! All randomness comes from the RNG the session passes in.

use crate::{
    application::{Application, Decision},
    rng::DecisionRng,
};

/// The strategy that picks a terminal outcome for a pending application.
pub trait ResolutionPolicy: Send {
    /// Unique stable name for logs.
    fn name(&self) -> &'static str;

    fn decide(&mut self, application: &Application, rng: &mut DecisionRng) -> Decision;
}

/// Uniform draw over the two terminal outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPolicy;

impl ResolutionPolicy for UniformPolicy {
    fn name(&self) -> &'static str { "uniform" }

    fn decide(&mut self, _application: &Application, rng: &mut DecisionRng) -> Decision {
        match rng.next_u64_below(2) {
            0 => Decision::Approved,
            _ => Decision::Rejected,
        }
    }
}

/// Always returns the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy(pub Decision);

impl ResolutionPolicy for FixedPolicy {
    fn name(&self) -> &'static str { "fixed" }

    fn decide(&mut self, _application: &Application, _rng: &mut DecisionRng) -> Decision {
        self.0
    }
}
