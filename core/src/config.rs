use crate::{
    error::{DecisionError, DecisionResult},
    funding::{FundingKind, FundingSource, TermRange},
    types::Millis,
};
use serde::{Deserialize, Serialize};

// ── Scoring ────────────────────────────────────────────────────────

/// Weights and caps of the eligibility heuristic.
///
/// Each sub-score is `min(input * factor, cap)`. The caps bound the
/// total, so they must never sum past 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Annual revenue is divided by this before capping.
    pub revenue_divisor:   f64,
    pub revenue_cap:       f64,
    /// Points per year of operation.
    pub years_multiplier:  f64,
    pub years_cap:         f64,
    /// Points per unit of revenue-to-request ratio.
    pub ratio_multiplier:  f64,
    pub ratio_cap:         f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            revenue_divisor:  12_000.0,
            revenue_cap:      35.0,
            years_multiplier: 12.0,
            years_cap:        40.0,
            ratio_multiplier: 12.0,
            ratio_cap:        25.0,
        }
    }
}

/// Rating cutoffs on the rounded score.
/// `score < medium` is Low, `medium <= score < high` is Medium, else High.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub medium: u8,
    pub high:   u8,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self { medium: 45, high: 75 }
    }
}

/// Fixed insight message per rating tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMessages {
    pub low:    String,
    pub medium: String,
    pub high:   String,
}

impl Default for InsightMessages {
    fn default() -> Self {
        Self {
            low: "Your business profile suggests higher risk. Consider improving revenue \
                  or requesting a smaller loan amount."
                .into(),
            medium: "Your business shows potential. A few more years of stable operation \
                     or higher revenue could improve your rating."
                .into(),
            high: "Your business demonstrates strong financials and eligibility for funding. \
                   Consider exploring various loan options."
                .into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights:    ScoringWeights,
    pub thresholds: RatingThresholds,
    #[serde(default)]
    pub insights:   InsightMessages,
}

// ── Lifecycle ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Simulated backend latency between submit and resolve.
    pub resolution_delay_ms: Millis,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self { resolution_delay_ms: 2_000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FundingCatalogFile {
    sources: Vec<FundingSource>,
}

// ── Aggregate ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionConfig {
    pub scoring:         ScoringConfig,
    pub lifecycle:       LifecycleConfig,
    pub funding_sources: Vec<FundingSource>,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            scoring:         ScoringConfig::default(),
            lifecycle:       LifecycleConfig::default(),
            funding_sources: default_funding_sources(),
        }
    }
}

impl DecisionConfig {
    /// Load from the data/ directory.
    /// In tests, use DecisionConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let scoring_path = format!("{data_dir}/scoring/eligibility_weights.json");
        let scoring_content = std::fs::read_to_string(&scoring_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {scoring_path}: {e}"))?;
        let scoring: ScoringConfig = serde_json::from_str(&scoring_content)?;

        let lifecycle_path = format!("{data_dir}/lifecycle/lifecycle.json");
        let lifecycle_content = std::fs::read_to_string(&lifecycle_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {lifecycle_path}: {e}"))?;
        let lifecycle: LifecycleConfig = serde_json::from_str(&lifecycle_content)?;

        let funding_path = format!("{data_dir}/funding/funding_sources.json");
        let funding_content = std::fs::read_to_string(&funding_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {funding_path}: {e}"))?;
        let funding_file: FundingCatalogFile = serde_json::from_str(&funding_content)?;

        let config = Self {
            scoring,
            lifecycle,
            funding_sources: funding_file.sources,
        };
        config.validate()?;
        log::debug!(
            "config loaded from {data_dir}: {} funding sources, delay={}ms",
            config.funding_sources.len(),
            config.lifecycle.resolution_delay_ms
        );
        Ok(config)
    }

    /// Reject values that would break the scorer or catalog invariants.
    pub fn validate(&self) -> DecisionResult<()> {
        let w = &self.scoring.weights;
        let positive = [
            ("revenue_divisor", w.revenue_divisor),
            ("years_multiplier", w.years_multiplier),
            ("ratio_multiplier", w.ratio_multiplier),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(DecisionError::config(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        let caps = [
            ("revenue_cap", w.revenue_cap),
            ("years_cap", w.years_cap),
            ("ratio_cap", w.ratio_cap),
        ];
        for (name, value) in caps {
            if !value.is_finite() || value < 0.0 {
                return Err(DecisionError::config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        let cap_sum = w.revenue_cap + w.years_cap + w.ratio_cap;
        if cap_sum > 100.0 {
            return Err(DecisionError::config(format!(
                "score caps sum to {cap_sum}, maximum is 100"
            )));
        }

        let t = &self.scoring.thresholds;
        if t.medium == 0 || t.medium >= t.high || t.high > 100 {
            return Err(DecisionError::config(format!(
                "thresholds must satisfy 0 < medium < high <= 100, got medium={} high={}",
                t.medium, t.high
            )));
        }

        for source in &self.funding_sources {
            source.validate()?;
        }
        Ok(())
    }
}

/// The demo catalog shown alongside loan applications.
pub fn default_funding_sources() -> Vec<FundingSource> {
    vec![
        FundingSource {
            name:                "Traditional Business Loan".into(),
            kind:                FundingKind::BankLoan,
            annual_rate_percent: 7.25,
            min_amount:          5_000.0,
            max_amount:          300_000.0,
            term:                Some(TermRange { min_months: 12, max_months: 84 }),
        },
        FundingSource {
            name:                "Women Entrepreneur Grant".into(),
            kind:                FundingKind::Grant,
            annual_rate_percent: 0.0,
            min_amount:          5_000.0,
            max_amount:          50_000.0,
            term:                None,
        },
        FundingSource {
            name:                "Peer-to-Peer Lending".into(),
            kind:                FundingKind::PeerToPeer,
            annual_rate_percent: 5.75,
            min_amount:          2_000.0,
            max_amount:          75_000.0,
            term:                Some(TermRange { min_months: 6, max_months: 48 }),
        },
        FundingSource {
            name:                "Microfinance Loan".into(),
            kind:                FundingKind::Microfinance,
            annual_rate_percent: 4.9,
            min_amount:          1_000.0,
            max_amount:          25_000.0,
            term:                Some(TermRange { min_months: 6, max_months: 36 }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        DecisionConfig::default().validate().unwrap();
    }

    #[test]
    fn caps_over_one_hundred_rejected() {
        let mut config = DecisionConfig::default();
        config.scoring.weights.years_cap = 41.0;
        assert!(matches!(
            config.validate(),
            Err(DecisionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let mut config = DecisionConfig::default();
        config.scoring.thresholds = RatingThresholds { medium: 80, high: 75 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_divisor_rejected() {
        let mut config = DecisionConfig::default();
        config.scoring.weights.revenue_divisor = 0.0;
        assert!(config.validate().is_err());
    }
}
