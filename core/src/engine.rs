//! The decision engine: wires configuration, scorer, funding catalog and
//! RNG streams, and opens application sessions.
//!
//! RULES:
//!   - Calculator and scorer calls are synchronous and never suspend.
//!   - Sessions own their applications. The engine keeps no reference
//!     to a session after handing it out.
//!   - Submission order is counted engine-wide.

use crate::{
    amortization::{self, AmortizationResult, LoanTerms},
    config::DecisionConfig,
    eligibility::{BusinessProfile, EligibilityResult, EligibilityScorer},
    error::DecisionResult,
    funding::FundingCatalog,
    lifecycle::ApplicationSession,
    policy::{ResolutionPolicy, UniformPolicy},
    rng::{RngBank, RngSlot},
};
use std::sync::{atomic::AtomicU64, Arc};

pub struct DecisionEngine {
    config:        DecisionConfig,
    scorer:        EligibilityScorer,
    funding:       FundingCatalog,
    rng_bank:      RngBank,
    sequence:      Arc<AtomicU64>,
    next_session:  u64,
}

impl DecisionEngine {
    /// Validate `config` and build an engine whose randomness derives from `seed`.
    pub fn new(config: DecisionConfig, seed: u64) -> DecisionResult<Self> {
        config.validate()?;
        log::debug!("engine built: seed={seed}");
        Ok(Self {
            scorer:       EligibilityScorer::new(config.scoring.clone()),
            funding:      FundingCatalog::new(config.funding_sources.clone()),
            rng_bank:     RngBank::new(seed),
            sequence:     Arc::new(AtomicU64::new(1)),
            next_session: 0,
            config,
        })
    }

    /// Engine with the built-in demo configuration.
    pub fn with_defaults(seed: u64) -> DecisionResult<Self> {
        Self::new(DecisionConfig::default(), seed)
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn amortize(&self, terms: &LoanTerms) -> DecisionResult<AmortizationResult> {
        amortization::compute(terms)
    }

    pub fn evaluate(&self, profile: &BusinessProfile) -> DecisionResult<EligibilityResult> {
        self.scorer.score(profile)
    }

    pub fn scorer(&self) -> &EligibilityScorer {
        &self.scorer
    }

    pub fn funding(&self) -> &FundingCatalog {
        &self.funding
    }

    /// Open a session resolved by the uniform two-outcome policy.
    pub fn open_session(&mut self) -> ApplicationSession {
        self.open_session_with(Box::new(UniformPolicy))
    }

    pub fn open_session_with(&mut self, policy: Box<dyn ResolutionPolicy>) -> ApplicationSession {
        let index = self.next_session;
        self.next_session += 1;

        ApplicationSession::new(
            format!("session-{index}"),
            &self.config.lifecycle,
            policy,
            self.rng_bank.for_stream(RngSlot::Resolution, index),
            self.rng_bank.for_stream(RngSlot::Identity, index),
            Arc::clone(&self.sequence),
        )
    }
}
