//! Eligibility scorer tests: weights, caps, thresholds and rejection of bad input.

use finempower_core::{
    config::{RatingThresholds, ScoringConfig},
    rng::DecisionRng,
    BusinessProfile, DecisionError, EligibilityScorer, InsightKey, Rating,
};

fn scorer() -> EligibilityScorer {
    EligibilityScorer::default()
}

#[test]
fn reference_profile_scores_medium() {
    let result = scorer()
        .score(&BusinessProfile::new(50_000.0, 2.0, 10_000.0))
        .unwrap();

    assert!((result.breakdown.revenue - 50_000.0 / 12_000.0).abs() < 1e-12);
    assert_eq!(result.breakdown.years, 24.0);
    assert_eq!(result.breakdown.loan_ratio, 25.0);
    assert_eq!(result.score, 53);
    assert_eq!(result.rating, Rating::Medium);
    assert_eq!(result.insight_key, InsightKey::BuildTrack);
}

#[test]
fn maximal_profile_scores_one_hundred() {
    let result = scorer()
        .score(&BusinessProfile::new(1_000_000.0, 50.0, 1_000.0))
        .unwrap();
    assert_eq!(result.score, 100);
    assert_eq!(result.rating, Rating::High);
    assert_eq!(result.insight_key, InsightKey::ExploreOptions);
}

#[test]
fn weak_profile_scores_low() {
    // 1 + 12 + 1.44 = 14.44
    let result = scorer()
        .score(&BusinessProfile::new(12_000.0, 1.0, 100_000.0))
        .unwrap();
    assert_eq!(result.score, 14);
    assert_eq!(result.rating, Rating::Low);
    assert_eq!(result.insight_key, InsightKey::ImproveRisk);
}

#[test]
fn rating_follows_the_rounded_score() {
    // 1 + 42 + 1.5 = 44.5, which rounds up into Medium.
    let result = scorer()
        .score(&BusinessProfile::new(12_000.0, 3.5, 96_000.0))
        .unwrap();
    assert_eq!(result.score, 45);
    assert_eq!(result.rating, Rating::Medium);
}

#[test]
fn unrounded_total_is_reported() {
    let result = scorer()
        .score(&BusinessProfile::new(50_000.0, 2.0, 10_000.0))
        .unwrap();
    let expected = 50_000.0 / 12_000.0 + 24.0 + 25.0;
    assert!((result.total - expected).abs() < 1e-12);
    assert_eq!(result.total, result.breakdown.total());

    let json = serde_json::to_value(&result).unwrap();
    assert!((json["total"].as_f64().unwrap() - expected).abs() < 1e-12);
}

#[test]
fn years_saturate_at_their_cap() {
    let veteran = scorer()
        .score(&BusinessProfile::new(60_000.0, 1_000.0, 10_000.0))
        .unwrap();
    assert_eq!(veteran.breakdown.years, 40.0);
}

#[test]
fn zero_revenue_is_rejected_not_scored_zero() {
    let err = scorer()
        .score(&BusinessProfile::new(0.0, 0.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, DecisionError::InvalidProfile { .. }));
}

#[test]
fn bad_inputs_are_rejected() {
    let bad = [
        BusinessProfile::new(50_000.0, 2.0, 0.0),
        BusinessProfile::new(50_000.0, 2.0, -10.0),
        BusinessProfile::new(50_000.0, -1.0, 10_000.0),
        BusinessProfile::new(-50_000.0, 2.0, 10_000.0),
        BusinessProfile::new(f64::NAN, 2.0, 10_000.0),
        BusinessProfile::new(50_000.0, f64::INFINITY, 10_000.0),
    ];
    for profile in bad {
        let err = scorer().score(&profile).unwrap_err();
        assert!(
            matches!(err, DecisionError::InvalidProfile { .. }),
            "{profile:?} should be rejected, got {err}"
        );
    }
}

#[test]
fn scores_stay_in_range_and_match_thresholds() {
    let mut rng = DecisionRng::from_seed(2024);
    let scorer = scorer();
    let thresholds = RatingThresholds::default();

    for _ in 0..2_000 {
        let profile = BusinessProfile::new(
            1.0 + rng.next_f64() * 1_000_000.0,
            rng.next_f64() * 20.0,
            1.0 + rng.next_f64() * 500_000.0,
        );
        let result = scorer.score(&profile).unwrap();

        assert!(result.score <= 100, "{profile:?} scored {}", result.score);
        let expected = if result.score < thresholds.medium {
            Rating::Low
        } else if result.score < thresholds.high {
            Rating::Medium
        } else {
            Rating::High
        };
        assert_eq!(result.rating, expected, "{profile:?}");
    }
}

#[test]
fn identical_profiles_give_identical_results() {
    let profile = BusinessProfile::new(80_000.0, 3.0, 25_000.0);
    assert_eq!(scorer().score(&profile).unwrap(), scorer().score(&profile).unwrap());
}

#[test]
fn thresholds_come_from_configuration() {
    let mut config = ScoringConfig::default();
    config.thresholds = RatingThresholds { medium: 20, high: 50 };
    let custom = EligibilityScorer::new(config);

    let result = custom
        .score(&BusinessProfile::new(50_000.0, 2.0, 10_000.0))
        .unwrap();
    assert_eq!(result.score, 53);
    assert_eq!(result.rating, Rating::High);
}

#[test]
fn insight_text_matches_rating() {
    let scorer = scorer();
    let result = scorer
        .score(&BusinessProfile::new(12_000.0, 1.0, 100_000.0))
        .unwrap();
    assert!(scorer.insight_text(&result).contains("higher risk"));
}
