//! Heuristic eligibility scorer.
//!
//! Not a credit model. Three independently capped sub-scores are summed,
//! rounded, and bucketed into a rating by fixed thresholds:
//!   revenue    = min(annual_revenue / revenue_divisor, revenue_cap)
//!   years      = min(years_of_operation * years_multiplier, years_cap)
//!   loan_ratio = min(annual_revenue / requested_amount * ratio_multiplier, ratio_cap)

use crate::{
    config::{InsightMessages, RatingThresholds, ScoringConfig},
    error::{DecisionError, DecisionResult},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub annual_revenue:     f64,
    pub years_of_operation: f64,
    pub requested_amount:   f64,
}

impl BusinessProfile {
    pub fn new(annual_revenue: f64, years_of_operation: f64, requested_amount: f64) -> Self {
        Self { annual_revenue, years_of_operation, requested_amount }
    }

    /// Negative or non-finite inputs are rejected, never clamped.
    pub fn validate(&self) -> DecisionResult<()> {
        let fields = [
            ("annual revenue", self.annual_revenue),
            ("years of operation", self.years_of_operation),
            ("requested amount", self.requested_amount),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(DecisionError::profile(format!("{name} must be finite, got {value}")));
            }
        }
        if self.annual_revenue <= 0.0 {
            return Err(DecisionError::profile(format!(
                "annual revenue must be positive, got {}",
                self.annual_revenue
            )));
        }
        if self.years_of_operation < 0.0 {
            return Err(DecisionError::profile(format!(
                "years of operation cannot be negative, got {}",
                self.years_of_operation
            )));
        }
        if self.requested_amount <= 0.0 {
            return Err(DecisionError::profile(format!(
                "requested amount must be positive, got {}",
                self.requested_amount
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl Rating {
    /// Monotonic in `score`.
    pub fn from_score(score: u8, thresholds: &RatingThresholds) -> Self {
        if score < thresholds.medium {
            Self::Low
        } else if score < thresholds.high {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn insight(&self) -> InsightKey {
        match self {
            Self::Low    => InsightKey::ImproveRisk,
            Self::Medium => InsightKey::BuildTrack,
            Self::High   => InsightKey::ExploreOptions,
        }
    }
}

/// Selects the fixed qualitative message for a rating tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKey {
    ImproveRisk,
    BuildTrack,
    ExploreOptions,
}

impl InsightKey {
    pub fn message<'a>(&self, messages: &'a InsightMessages) -> &'a str {
        match self {
            Self::ImproveRisk    => &messages.low,
            Self::BuildTrack     => &messages.medium,
            Self::ExploreOptions => &messages.high,
        }
    }
}

/// The three capped contributions, kept for transparency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub revenue:    f64,
    pub years:      f64,
    pub loan_ratio: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.revenue + self.years + self.loan_ratio
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Sum of the breakdown before rounding.
    pub total:       f64,
    /// Rounded total, 0..=100.
    pub score:       u8,
    pub rating:      Rating,
    pub insight_key: InsightKey,
    pub breakdown:   ScoreBreakdown,
}

/// Stateless scorer bound to one scoring configuration.
#[derive(Debug, Clone)]
pub struct EligibilityScorer {
    config: ScoringConfig,
}

impl Default for EligibilityScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl EligibilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &BusinessProfile) -> DecisionResult<EligibilityResult> {
        if let Err(e) = profile.validate() {
            log::warn!("eligibility: rejected profile {profile:?}: {e}");
            return Err(e);
        }

        let w = &self.config.weights;
        let breakdown = ScoreBreakdown {
            revenue:    (profile.annual_revenue / w.revenue_divisor).min(w.revenue_cap),
            years:      (profile.years_of_operation * w.years_multiplier).min(w.years_cap),
            loan_ratio: (profile.annual_revenue / profile.requested_amount * w.ratio_multiplier)
                .min(w.ratio_cap),
        };

        // Caps are validated to sum to at most 100; the clamp only guards rounding.
        let total = breakdown.total();
        let score = total.round().clamp(0.0, 100.0) as u8;
        let rating = Rating::from_score(score, &self.config.thresholds);

        log::debug!(
            "eligibility: revenue={:.2} years={:.2} ratio={:.2} -> score={score} rating={rating:?}",
            breakdown.revenue,
            breakdown.years,
            breakdown.loan_ratio
        );

        Ok(EligibilityResult {
            total,
            score,
            rating,
            insight_key: rating.insight(),
            breakdown,
        })
    }

    /// The configured message for `result`'s insight key.
    pub fn insight_text(&self, result: &EligibilityResult) -> &str {
        result.insight_key.message(&self.config.insights)
    }
}
