//! Scheduled resolution timers and the cancellation tokens that guard them.
//!
//! RULE: A timer fires only if neither its own token nor its session's
//! token has been cancelled. Cancelled timers are dropped silently.

use crate::types::{ApplicationId, Millis};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared cancellation flag. Clones observe the same flag; children
/// also observe their parent's.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent:    Option<Arc<AtomicBool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled by itself or by `self`.
    pub fn child(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent:    Some(Arc::clone(&self.cancelled)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self
                .parent
                .as_ref()
                .is_some_and(|p| p.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone)]
pub struct ResolutionTimer {
    pub application_id: ApplicationId,
    pub sequence:       u64,
    pub due_at:         Millis,
    pub token:          CancellationToken,
}

/// Pending timers, fired in (due time, submission order) order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<ResolutionTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, timer: ResolutionTimer) {
        self.timers.push(timer);
        self.timers.sort_by_key(|t| (t.due_at, t.sequence));
    }

    /// Remove and return every live timer due at or before `now`.
    /// Cancelled timers encountered on the way are discarded.
    pub fn take_due(&mut self, now: Millis) -> Vec<ResolutionTimer> {
        let split = self.timers.partition_point(|t| t.due_at <= now);
        self.timers
            .drain(..split)
            .filter(|t| !t.token.is_cancelled())
            .collect()
    }

    /// Cancel the timers guarding `application_id`. They stay queued until
    /// due and are discarded then. Returns how many were live.
    pub fn cancel(&mut self, application_id: &ApplicationId) -> usize {
        let mut cancelled = 0;
        for timer in &self.timers {
            if &timer.application_id == application_id && !timer.token.is_cancelled() {
                timer.token.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Remove every timer and return the ones still live.
    pub fn drain_live(&mut self) -> Vec<ResolutionTimer> {
        std::mem::take(&mut self.timers)
            .into_iter()
            .filter(|t| !t.token.is_cancelled())
            .collect()
    }

    pub fn is_scheduled(&self, application_id: &ApplicationId) -> bool {
        self.timers
            .iter()
            .any(|t| &t.application_id == application_id && !t.token.is_cancelled())
    }

    pub fn len(&self) -> usize {
        self.timers.iter().filter(|t| !t.token.is_cancelled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
