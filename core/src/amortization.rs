//! Amortized-loan payment calculator.
//!
//! Pure and synchronous: identical terms always yield an identical
//! result, and the work is bounded by `term_months` iterations.
//!
//! Payment uses the standard annuity formula, in its discounted form
//!   payment = P * r / (1 - (1+r)^-n),  r = annual% / 12 / 100
//! which equals P * r * (1+r)^n / ((1+r)^n - 1) but tends to P * r instead of
//! overflowing for long or expensive loans. A zero rate pays P / n.

use crate::error::{DecisionError, DecisionResult};
use serde::{Deserialize, Serialize};

/// Longest term the calculator accepts: one hundred years of monthly rows.
pub const MAX_TERM_MONTHS: u32 = 1_200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal:           f64,
    pub annual_rate_percent: f64,
    pub term_months:         u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_months: u32) -> Self {
        Self { principal, annual_rate_percent, term_months }
    }

    /// Refuse anything the formula cannot handle.
    pub fn validate(&self) -> DecisionResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(DecisionError::terms(format!(
                "principal must be finite and positive, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(DecisionError::terms(format!(
                "annual rate must be finite and non-negative, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_months < 1 {
            return Err(DecisionError::terms("term must be at least one month"));
        }
        if self.term_months > MAX_TERM_MONTHS {
            return Err(DecisionError::terms(format!(
                "term must be at most {MAX_TERM_MONTHS} months, got {}",
                self.term_months
            )));
        }
        Ok(())
    }

    /// Periodic (monthly) rate as a fraction.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// 1-based.
    pub period:            u32,
    pub principal_portion: f64,
    pub interest_portion:  f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub periodic_payment: f64,
    pub total_payment:    f64,
    pub total_interest:   f64,
    /// Chronological, one row per month.
    pub schedule:         Vec<PaymentRow>,
}

impl AmortizationResult {
    pub fn final_row(&self) -> Option<&PaymentRow> {
        self.schedule.last()
    }
}

/// Present value of one unit paid `k` periods out, `(1+r)^-k`.
/// `None` when the rate is zero.
fn discount(r: f64, k: u32) -> Option<f64> {
    (r != 0.0).then(|| (1.0 + r).powf(-(k as f64)))
}

/// `(1+r)^-n` for an interest-bearing loan. Rates too small to move it off
/// 1.0 behave as zero.
fn term_discount(terms: &LoanTerms) -> Option<f64> {
    discount(terms.monthly_rate(), terms.term_months).filter(|v| *v < 1.0)
}

/// Fixed monthly payment for `terms`. Assumes `terms` already validated.
fn periodic_payment(terms: &LoanTerms) -> f64 {
    match term_discount(terms) {
        Some(v) => terms.principal * terms.monthly_rate() / (1.0 - v),
        None => terms.principal / terms.term_months as f64,
    }
}

/// Compute the payment, totals and full schedule for `terms`.
///
/// Rows are evaluated in closed form rather than by carrying a running
/// balance, so the principal portions sum to the principal and the last
/// balance lands on zero without rounding drift.
pub fn compute(terms: &LoanTerms) -> DecisionResult<AmortizationResult> {
    if let Err(e) = terms.validate() {
        log::warn!("amortization: rejected terms {terms:?}: {e}");
        return Err(e);
    }

    let r = terms.monthly_rate();
    let n = terms.term_months;
    let payment = periodic_payment(terms);
    let total_payment = payment * n as f64;
    let total_interest = total_payment - terms.principal;

    if !payment.is_finite() || !total_payment.is_finite() {
        log::warn!("amortization: terms {terms:?} overflow the payment");
        return Err(DecisionError::terms(format!(
            "rate {}% is too large to amortize",
            terms.annual_rate_percent
        )));
    }

    let flat = term_discount(terms).is_none();

    let schedule = (1..=n)
        .map(|period| {
            let remaining = n - period;
            let (principal_portion, remaining_balance) = if flat {
                (payment, terms.principal * remaining as f64 / n as f64)
            } else {
                let paid_down = payment * discount(r, remaining + 1).unwrap_or(1.0);
                let balance = payment * (1.0 - discount(r, remaining).unwrap_or(1.0)) / r;
                (paid_down, balance.max(0.0))
            };
            PaymentRow {
                period,
                principal_portion,
                interest_portion: payment - principal_portion,
                remaining_balance,
            }
        })
        .collect();

    log::debug!(
        "amortization: P={:.2} rate={}% n={} -> payment={:.4} interest={:.4}",
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
        payment,
        total_interest
    );

    Ok(AmortizationResult {
        periodic_payment: payment,
        total_payment,
        total_interest,
        schedule,
    })
}
