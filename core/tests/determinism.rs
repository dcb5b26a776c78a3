//! Same seed, same operations: identical ids, outcomes and event logs.

use finempower_core::{ApplicationStatus, DecisionEngine, LoanRequest};

fn request() -> LoanRequest {
    LoanRequest {
        business_name:   "Corner Store".into(),
        annual_revenue:  80_000.0,
        loan_amount:     20_000.0,
        purpose:         "Refit".into(),
        duration_months: 24,
    }
}

/// Run `sessions` sessions with one application each and collect the log payloads.
fn run(seed: u64, sessions: usize) -> (Vec<String>, Vec<ApplicationStatus>) {
    let mut engine = DecisionEngine::with_defaults(seed).unwrap();
    let delay = engine.config().lifecycle.resolution_delay_ms;
    let mut payloads = Vec::new();
    let mut outcomes = Vec::new();

    for _ in 0..sessions {
        let mut session = engine.open_session();
        let app = session.submit(request()).unwrap();
        session.advance(delay).unwrap();
        outcomes.push(session.current_status(&app.id).unwrap());
        payloads.extend(session.event_log().iter().map(|e| e.payload.clone()));
    }
    (payloads, outcomes)
}

#[test]
fn same_seed_produces_identical_event_logs() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let (log_a, outcomes_a) = run(SEED, 50);
    let (log_b, outcomes_b) = run(SEED, 50);

    assert_eq!(outcomes_a, outcomes_b);
    assert_eq!(log_a.len(), log_b.len());
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "Event log diverged at entry {i}:\n  A: {a}\n  B: {b}");
    }
}

#[test]
fn different_seeds_produce_different_logs() {
    let (log_a, _) = run(42, 10);
    let (log_b, _) = run(99, 10);

    let any_different = log_a.iter().zip(log_b.iter()).any(|(a, b)| a != b);
    assert!(any_different, "Different seeds produced identical logs; seed is not being used");
}

#[test]
fn uniform_policy_reaches_both_outcomes() {
    let (_, outcomes) = run(7, 200);

    assert!(outcomes.iter().all(|s| s.is_terminal()));
    assert!(outcomes.contains(&ApplicationStatus::Approved));
    assert!(outcomes.contains(&ApplicationStatus::Rejected));
}
