//! Application lifecycle: one logical form session.
//!
//! RULES:
//!   - At most one application per session is Pending at any time.
//!   - Each submit schedules exactly one resolution timer.
//!   - A timer resolves its application once; later firings are no-ops.
//!     Resolving by hand cancels the application's timer.
//!   - Closing the session cancels every outstanding timer. Nothing
//!     resolves after close and no error is raised for the lost timers.
//!   - Every transition is recorded in the session's event log.

use crate::{
    application::{Application, ApplicationStatus},
    clock::SimClock,
    config::LifecycleConfig,
    error::{DecisionError, DecisionResult},
    event::{DecisionEvent, EventLogEntry},
    notice::Notice,
    policy::ResolutionPolicy,
    request::LoanRequest,
    rng::DecisionRng,
    timer::{CancellationToken, ResolutionTimer, TimerQueue},
    types::{ApplicationId, Millis, SessionId},
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

pub struct ApplicationSession {
    pub session_id:   SessionId,
    clock:            SimClock,
    policy:           Box<dyn ResolutionPolicy>,
    resolution_rng:   DecisionRng,
    identity_rng:     DecisionRng,
    resolution_delay: Millis,
    sequence:         Arc<AtomicU64>,
    applications:     Vec<Application>,
    timers:           TimerQueue,
    token:            CancellationToken,
    events:           Vec<DecisionEvent>,
    log:              Vec<EventLogEntry>,
    closed:           bool,
}

impl ApplicationSession {
    /// Sessions are normally opened through `DecisionEngine::open_session`.
    /// `sequence` is shared with every other session of the same engine.
    pub fn new(
        session_id: SessionId,
        config: &LifecycleConfig,
        policy: Box<dyn ResolutionPolicy>,
        resolution_rng: DecisionRng,
        identity_rng: DecisionRng,
        sequence: Arc<AtomicU64>,
    ) -> Self {
        log::debug!(
            "session={session_id} opened: policy={} delay={}ms",
            policy.name(),
            config.resolution_delay_ms
        );
        Self {
            clock: SimClock::new(session_id.clone()),
            session_id,
            policy,
            resolution_rng,
            identity_rng,
            resolution_delay: config.resolution_delay_ms,
            sequence,
            applications: Vec::new(),
            timers: TimerQueue::new(),
            token: CancellationToken::new(),
            events: Vec::new(),
            log: Vec::new(),
            closed: false,
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    // ── Operations ─────────────────────────────────────────────

    /// Validate and submit `request`. The new application is Pending and
    /// its resolution is scheduled `resolution_delay` from now.
    pub fn submit(&mut self, request: LoanRequest) -> DecisionResult<Application> {
        self.ensure_open()?;

        if let Err(e) = request.validate() {
            log::warn!("t={} session={} submit rejected: {e}", self.clock.now, self.session_id);
            return Err(e);
        }

        if let Some(pending) = self.pending_application() {
            log::warn!(
                "t={} session={} submit refused: {} still pending",
                self.clock.now,
                self.session_id,
                pending.id
            );
            return Err(DecisionError::AlreadySubmitted { pending: pending.id });
        }

        let id = ApplicationId::from_random_bytes(self.identity_rng.next_bytes());
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let now = self.clock.now;

        let mut application = Application::new(id, sequence, now, request);
        application.transition(ApplicationStatus::Pending)?;

        let resolve_at = self.clock.after(self.resolution_delay);
        self.timers.schedule(ResolutionTimer {
            application_id: id,
            sequence,
            due_at: resolve_at,
            token: self.token.child(),
        });

        log::info!(
            "t={now} session={} submitted {id} (seq={sequence}), resolves at t={resolve_at}",
            self.session_id
        );

        self.applications.push(application.clone());
        self.record(DecisionEvent::ApplicationSubmitted {
            at: now,
            application_id: id,
            sequence,
            resolve_at,
        })?;

        Ok(application)
    }

    /// Move the clock forward by `ms` and fire every timer that falls due.
    /// Returns the events emitted during this step.
    pub fn advance(&mut self, ms: Millis) -> DecisionResult<Vec<DecisionEvent>> {
        self.ensure_open()?;

        let before = self.events.len();
        let now = self.clock.advance_by(ms);

        let mut due = self.timers.take_due(now).into_iter();
        while let Some(timer) = due.next() {
            log::debug!(
                "t={now} session={} timer for {} fired (due t={})",
                self.session_id,
                timer.application_id,
                timer.due_at
            );
            if let Err(e) = self.resolve(&timer.application_id) {
                // Timers behind the failed one stay queued for the next step.
                for rest in due {
                    self.timers.schedule(rest);
                }
                return Err(e);
            }
        }

        Ok(self.events[before..].to_vec())
    }

    /// Choose a terminal outcome for a pending application.
    /// Already-terminal applications are left untouched.
    pub fn resolve(&mut self, id: &ApplicationId) -> DecisionResult<ApplicationStatus> {
        self.ensure_open()?;

        let idx = self
            .applications
            .iter()
            .position(|a| &a.id == id)
            .ok_or(DecisionError::ApplicationNotFound { id: *id })?;

        let current = self.applications[idx].status();
        if current.is_terminal() {
            log::debug!(
                "t={} session={} resolve of {id} ignored: already {current}",
                self.clock.now,
                self.session_id
            );
            return Ok(current);
        }

        let decision = self
            .policy
            .decide(&self.applications[idx], &mut self.resolution_rng);
        let next = ApplicationStatus::from(decision);
        self.applications[idx].transition(next)?;
        if self.timers.cancel(id) > 0 {
            log::debug!(
                "t={} session={} timer for {id} cancelled by early resolve",
                self.clock.now,
                self.session_id
            );
        }

        log::info!(
            "t={} session={} {id} resolved: {next} (policy={})",
            self.clock.now,
            self.session_id,
            self.policy.name()
        );

        self.record(DecisionEvent::ApplicationResolved {
            at: self.clock.now,
            application_id: *id,
            decision,
            policy: self.policy.name().to_string(),
        })?;

        Ok(next)
    }

    pub fn current_status(&self, id: &ApplicationId) -> DecisionResult<ApplicationStatus> {
        self.ensure_open()?;
        self.application(id)
            .map(Application::status)
            .ok_or(DecisionError::ApplicationNotFound { id: *id })
    }

    /// Tear the session down. Outstanding timers are cancelled and the
    /// applications discarded. Idempotent.
    pub fn close(&mut self) -> DecisionResult<Vec<DecisionEvent>> {
        if self.closed {
            return Ok(Vec::new());
        }

        let before = self.events.len();
        let outstanding = self.timers.drain_live();
        self.token.cancel();
        for timer in outstanding {
            log::debug!(
                "t={} session={} cancelled timer for {}",
                self.clock.now,
                self.session_id,
                timer.application_id
            );
            self.record(DecisionEvent::ResolutionCancelled {
                at: self.clock.now,
                application_id: timer.application_id,
            })?;
        }

        self.applications.clear();
        self.closed = true;
        log::info!("t={} session={} closed", self.clock.now, self.session_id);

        Ok(self.events[before..].to_vec())
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|a| &a.id == id)
    }

    /// Applications in submission order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn pending_application(&self) -> Option<&Application> {
        self.applications
            .iter()
            .find(|a| a.status() == ApplicationStatus::Pending)
    }

    pub fn has_scheduled_resolution(&self, id: &ApplicationId) -> bool {
        self.timers.is_scheduled(id)
    }

    pub fn scheduled_resolutions(&self) -> usize {
        self.timers.len()
    }

    pub fn events(&self) -> &[DecisionEvent] {
        &self.events
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.log
    }

    /// Toast messages for every event so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.events.iter().filter_map(Notice::for_event).collect()
    }

    // ── Internals ──────────────────────────────────────────────

    fn ensure_open(&self) -> DecisionResult<()> {
        if self.closed {
            return Err(DecisionError::SessionClosed {
                session_id: self.session_id.clone(),
            });
        }
        Ok(())
    }

    fn record(&mut self, event: DecisionEvent) -> DecisionResult<()> {
        let entry = EventLogEntry {
            at:         self.clock.now,
            session_id: self.session_id.clone(),
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(&event)?,
        };
        self.log.push(entry);
        self.events.push(event);
        Ok(())
    }
}

impl Drop for ApplicationSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("session={} close on drop failed: {e}", self.session_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DecisionEngine;
    use crate::policy::FixedPolicy;
    use crate::application::Decision;

    fn request() -> LoanRequest {
        LoanRequest {
            business_name:   "Bakery".into(),
            annual_revenue:  50_000.0,
            loan_amount:     10_000.0,
            purpose:         "Ovens".into(),
            duration_months: 12,
        }
    }

    #[test]
    fn failed_timer_leaves_the_rest_queued() {
        let mut engine = DecisionEngine::with_defaults(3).unwrap();
        let mut session = engine.open_session_with(Box::new(FixedPolicy(Decision::Approved)));
        let app = session.submit(request()).unwrap();
        let delay = session.resolution_delay;

        // An orphan timer ordered ahead of the real one.
        let orphan = ApplicationId::from_random_bytes([9; 16]);
        session.timers.schedule(ResolutionTimer {
            application_id: orphan,
            sequence:       0,
            due_at:         delay,
            token:          session.token.child(),
        });

        let err = session.advance(delay).unwrap_err();
        assert!(matches!(err, DecisionError::ApplicationNotFound { id } if id == orphan));
        assert!(session.has_scheduled_resolution(&app.id));
        assert_eq!(session.current_status(&app.id).unwrap(), ApplicationStatus::Pending);

        let events = session.advance(0).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(session.current_status(&app.id).unwrap(), ApplicationStatus::Approved);
    }

    #[test]
    fn close_skips_timers_already_resolved_by_hand() {
        let mut engine = DecisionEngine::with_defaults(4).unwrap();
        let mut session = engine.open_session_with(Box::new(FixedPolicy(Decision::Rejected)));
        let app = session.submit(request()).unwrap();
        session.resolve(&app.id).unwrap();

        let events = session.close().unwrap();
        assert!(events.is_empty(), "nothing left to cancel: {events:?}");
        assert!(session.is_closed());
    }
}
