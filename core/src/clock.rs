//! Session clock: simulated milliseconds, advanced explicitly by the caller.
//!
//! RULE: Nothing in the engine reads wall-clock time.
//! Simulated latency is expressed as a due time on this clock.

use crate::types::{Millis, SessionId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimClock {
    pub session_id: SessionId,
    pub now:        Millis,
}

impl SimClock {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id, now: 0 }
    }

    /// Advance by `ms`. Returns the new time.
    pub fn advance_by(&mut self, ms: Millis) -> Millis {
        self.now = self.now.saturating_add(ms);
        self.now
    }

    /// Time `delay` milliseconds from now.
    pub fn after(&self, delay: Millis) -> Millis {
        self.now.saturating_add(delay)
    }
}
