use crate::{
    request::LoanRequest,
    types::{ApplicationId, Millis},
};
use serde::{Deserialize, Serialize};

/// Commands accepted from the presentation layer, one JSON object per line.
/// Variants are only ever appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    // ── Calculators ───────────────────────────────
    Amortize {
        principal:           f64,
        annual_rate_percent: f64,
        term_months:         u32,
    },
    Score {
        annual_revenue:     f64,
        years_of_operation: f64,
        requested_amount:   f64,
    },

    // ── Application lifecycle ─────────────────────
    Submit {
        request: LoanRequest,
    },
    Advance {
        ms: Millis,
    },
    Resolve {
        application_id: ApplicationId,
    },
    Status {
        application_id: ApplicationId,
    },

    // ── Funding catalog ───────────────────────────
    Funding {
        amount: f64,
    },
    Quote {
        source:      String,
        amount:      f64,
        term_months: u32,
    },

    Quit,
}
