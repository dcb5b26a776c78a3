//! Loan calculator tests: annuity payment, schedule shape, rate edge cases.

use finempower_core::{
    amortization::{compute, MAX_TERM_MONTHS},
    DecisionError, LoanTerms,
};

fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected}, got {actual} (tol {tol})"
    );
}

/// Terms spanning short and long loans, cheap and expensive rates.
fn sample_terms() -> Vec<LoanTerms> {
    vec![
        LoanTerms::new(10_000.0, 7.25, 12),
        LoanTerms::new(500.0, 0.1, 6),
        LoanTerms::new(100_000.0, 30.0, 60),
        LoanTerms::new(250_000.0, 4.9, 360),
        LoanTerms::new(1_234.56, 12.5, 7),
        LoanTerms::new(75_000.0, 5.75, 48),
    ]
}

#[test]
fn reference_loan_matches_annuity_formula() {
    let result = compute(&LoanTerms::new(10_000.0, 7.25, 12)).unwrap();

    assert_close(result.periodic_payment, 866.42, 0.005, "periodic payment");
    assert_close(result.total_payment, 10_397.04, 0.005, "total payment");
    assert_close(result.total_interest, 397.04, 0.005, "total interest");
    assert_eq!(result.schedule.len(), 12);
}

#[test]
fn principal_portions_sum_to_principal() {
    for terms in sample_terms() {
        let result = compute(&terms).unwrap();
        let repaid: f64 = result.schedule.iter().map(|r| r.principal_portion).sum();
        let rel = (repaid - terms.principal).abs() / terms.principal;
        assert!(rel < 1e-6, "{terms:?}: repaid {repaid}, relative error {rel}");
    }
}

#[test]
fn final_balance_is_exactly_zero() {
    for terms in sample_terms() {
        let result = compute(&terms).unwrap();
        let last = result.final_row().expect("schedule is never empty");
        assert_eq!(last.remaining_balance, 0.0, "{terms:?}");
        assert_eq!(last.period, terms.term_months);
    }
}

#[test]
fn schedule_is_chronological_and_balance_decreases() {
    for terms in sample_terms() {
        let result = compute(&terms).unwrap();
        let mut previous = terms.principal;
        for (i, row) in result.schedule.iter().enumerate() {
            assert_eq!(row.period as usize, i + 1);
            assert!(row.remaining_balance >= 0.0);
            assert!(
                row.remaining_balance < previous,
                "{terms:?}: balance did not fall at period {}",
                row.period
            );
            previous = row.remaining_balance;
        }
    }
}

#[test]
fn rows_add_up_to_the_payment() {
    let result = compute(&LoanTerms::new(100_000.0, 30.0, 60)).unwrap();
    for row in &result.schedule {
        assert_close(
            row.principal_portion + row.interest_portion,
            result.periodic_payment,
            1e-9,
            "row total",
        );
    }
}

#[test]
fn zero_rate_splits_principal_evenly() {
    let terms = LoanTerms::new(12_000.0, 0.0, 24);
    let result = compute(&terms).unwrap();

    assert_close(result.periodic_payment, 500.0, 1e-12, "periodic payment");
    assert_close(result.total_interest, 0.0, 1e-9, "total interest");
    assert!(result.schedule.iter().all(|r| r.interest_portion == 0.0));
    assert_eq!(result.final_row().unwrap().remaining_balance, 0.0);
}

#[test]
fn identical_terms_give_identical_results() {
    let terms = LoanTerms::new(42_000.0, 6.5, 36);
    assert_eq!(compute(&terms).unwrap(), compute(&terms).unwrap());
}

#[test]
fn invalid_terms_are_refused() {
    let bad = [
        LoanTerms::new(0.0, 5.0, 12),
        LoanTerms::new(-100.0, 5.0, 12),
        LoanTerms::new(f64::INFINITY, 5.0, 12),
        LoanTerms::new(1_000.0, -0.5, 12),
        LoanTerms::new(1_000.0, f64::NAN, 12),
        LoanTerms::new(1_000.0, 5.0, 0),
        LoanTerms::new(1.0, 1.0, MAX_TERM_MONTHS + 1),
        LoanTerms::new(1.0, 1.0, u32::MAX),
        LoanTerms::new(f64::MAX, 1e300, 12),
    ];
    for terms in bad {
        let err = compute(&terms).unwrap_err();
        assert!(
            matches!(err, DecisionError::InvalidTerms { .. }),
            "{terms:?} should be invalid terms, got {err}"
        );
    }
}

#[test]
fn longest_accepted_term_still_amortizes() {
    let result = compute(&LoanTerms::new(250_000.0, 7.25, MAX_TERM_MONTHS)).unwrap();
    assert_eq!(result.schedule.len(), MAX_TERM_MONTHS as usize);
    assert!(result.periodic_payment.is_finite());
}

#[test]
fn extreme_rate_and_term_stay_finite() {
    // (1 + 100)^1100 overflows f64; the payment must tend to P * r instead.
    let terms = LoanTerms::new(10_000.0, 1_200.0, 1_100);
    let result = compute(&terms).unwrap();

    assert_close(result.periodic_payment, 1_000_000.0, 1e-6, "periodic payment");
    assert!(result.total_interest.is_finite());
    for row in &result.schedule {
        assert!(
            row.principal_portion.is_finite()
                && row.interest_portion.is_finite()
                && row.remaining_balance.is_finite(),
            "non-finite row {row:?}"
        );
    }

    let repaid: f64 = result.schedule.iter().map(|r| r.principal_portion).sum();
    assert_close(repaid, terms.principal, terms.principal * 1e-9, "principal repaid");
    assert_eq!(result.final_row().unwrap().remaining_balance, 0.0);
}
