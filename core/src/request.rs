//! The submitted loan application form, validated at the boundary.

use crate::{
    amortization::{LoanTerms, MAX_TERM_MONTHS},
    error::{DecisionError, DecisionResult},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub business_name:   String,
    pub annual_revenue:  f64,
    pub loan_amount:     f64,
    pub purpose:         String,
    pub duration_months: u32,
}

impl LoanRequest {
    pub fn validate(&self) -> DecisionResult<()> {
        if self.business_name.trim().is_empty() {
            return Err(DecisionError::request("business name is required"));
        }
        if self.purpose.trim().is_empty() {
            return Err(DecisionError::request("loan purpose is required"));
        }
        if !self.annual_revenue.is_finite() || self.annual_revenue <= 0.0 {
            return Err(DecisionError::profile(format!(
                "annual revenue must be finite and positive, got {}",
                self.annual_revenue
            )));
        }
        if !self.loan_amount.is_finite() || self.loan_amount <= 0.0 {
            return Err(DecisionError::terms(format!(
                "loan amount must be finite and positive, got {}",
                self.loan_amount
            )));
        }
        if !(1..=MAX_TERM_MONTHS).contains(&self.duration_months) {
            return Err(DecisionError::terms(format!(
                "duration must be between 1 and {MAX_TERM_MONTHS} months, got {}",
                self.duration_months
            )));
        }
        Ok(())
    }

    /// Terms for this request at the given annual rate.
    pub fn loan_terms(&self, annual_rate_percent: f64) -> LoanTerms {
        LoanTerms::new(self.loan_amount, annual_rate_percent, self.duration_months)
    }
}
