//! Funding catalog: the financing options offered next to an application,
//! including the alternatives shown after a rejection.

use crate::{
    amortization::{self, AmortizationResult, LoanTerms},
    error::{DecisionError, DecisionResult},
};
use serde::{Deserialize, Serialize};

/// Number of sources surfaced as alternatives.
pub const ALTERNATIVES_SHOWN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingKind {
    BankLoan,
    Grant,
    PeerToPeer,
    Microfinance,
}

impl FundingKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BankLoan     => "Bank Loan",
            Self::Grant        => "Grant",
            Self::PeerToPeer   => "P2P",
            Self::Microfinance => "Microfinance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRange {
    pub min_months: u32,
    pub max_months: u32,
}

impl TermRange {
    pub fn contains(&self, months: u32) -> bool {
        (self.min_months..=self.max_months).contains(&months)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    pub name:                String,
    pub kind:                FundingKind,
    pub annual_rate_percent: f64,
    pub min_amount:          f64,
    pub max_amount:          f64,
    /// `None` for funding that is never repaid.
    pub term:                Option<TermRange>,
}

impl FundingSource {
    pub fn accepts_amount(&self, amount: f64) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    pub(crate) fn validate(&self) -> DecisionResult<()> {
        if self.name.trim().is_empty() {
            return Err(DecisionError::config("funding source name is empty"));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(DecisionError::config(format!(
                "{}: rate must be finite and non-negative",
                self.name
            )));
        }
        if !(self.min_amount > 0.0 && self.min_amount <= self.max_amount)
            || !self.max_amount.is_finite()
        {
            return Err(DecisionError::config(format!(
                "{}: amount range {}..{} is invalid",
                self.name, self.min_amount, self.max_amount
            )));
        }
        if let Some(term) = self.term {
            if term.min_months < 1 || term.min_months > term.max_months {
                return Err(DecisionError::config(format!(
                    "{}: term range {}..{} months is invalid",
                    self.name, term.min_months, term.max_months
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FundingCatalog {
    sources: Vec<FundingSource>,
}

impl FundingCatalog {
    pub fn new(sources: Vec<FundingSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[FundingSource] {
        &self.sources
    }

    pub fn find(&self, name: &str) -> Option<&FundingSource> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// The options listed after an application is not approved.
    pub fn alternatives(&self) -> &[FundingSource] {
        &self.sources[..self.sources.len().min(ALTERNATIVES_SHOWN)]
    }

    pub fn eligible_for(&self, amount: f64) -> Vec<&FundingSource> {
        self.sources.iter().filter(|s| s.accepts_amount(amount)).collect()
    }

    /// Repayment schedule for `amount` over `term_months` from the named source.
    /// Grants quote to `None`.
    pub fn quote(
        &self,
        name: &str,
        amount: f64,
        term_months: u32,
    ) -> DecisionResult<Option<AmortizationResult>> {
        let source = self
            .find(name)
            .ok_or_else(|| DecisionError::terms(format!("unknown funding source '{name}'")))?;

        if !source.accepts_amount(amount) {
            return Err(DecisionError::terms(format!(
                "{} lends between ${:.2} and ${:.2}, requested ${amount:.2}",
                source.name, source.min_amount, source.max_amount
            )));
        }

        let Some(range) = source.term else {
            return Ok(None);
        };
        if !range.contains(term_months) {
            return Err(DecisionError::terms(format!(
                "{} terms run {}-{} months, requested {term_months}",
                source.name, range.min_months, range.max_months
            )));
        }

        let terms = LoanTerms::new(amount, source.annual_rate_percent, term_months);
        amortization::compute(&terms).map(Some)
    }
}
