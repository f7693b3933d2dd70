/// The single-active-timer state machine and its session bookkeeping.
use tracing::{debug, info, warn};

use crate::clock::{Clock, elapsed_since};
use crate::error::Result;
use crate::ledger::SessionLedger;
use crate::stats;
use crate::store::{self, SESSIONS_KEY, Store, TIMER_KEY};
use crate::types::{ProjectId, SessionId, TimeSession, TimerState};

/// Owns the timer, the ledger and their persistence.
///
/// Every transition writes its ledger change and its new timer state in one
/// batch, and only updates memory after that batch is stored.
pub struct Tracker<S: Store, C: Clock> {
    store: S,
    clock: C,
    state: TimerState,
    ledger: SessionLedger,
}

impl<S: Store, C: Clock> Tracker<S, C> {
    /// Restores timer and ledger from `store`. Absent keys start a fresh tracker.
    pub fn open(store: S, clock: C) -> Result<Self> {
        let state: TimerState = store::load_or_default(&store, TIMER_KEY)?;
        let ledger: SessionLedger = store::load_or_default(&store, SESSIONS_KEY)?;
        debug!(
            sessions = ledger.len(),
            running = state.is_running(),
            "loaded tracker"
        );
        Ok(Self {
            store,
            clock,
            state,
            ledger,
        })
    }

    /// Starts timing `project`, closing any running interval first.
    ///
    /// Restarting the running project still splits it into two sessions.
    /// Returns the closed session, if there was one.
    pub fn start(&mut self, project: &str) -> Result<Option<TimeSession>> {
        let project_id = ProjectId::new(project)?;
        let now = self.clock.now();

        let closed = self.close_running(now);
        let next = TimerState::Running {
            project_id: project_id.clone(),
            start_time: now,
        };
        self.commit(closed.as_ref(), next)?;

        if let Some(session) = &closed {
            info!(
                project = %session.project_id,
                session = %session.id,
                duration = session.duration,
                "closed interval on switch"
            );
        }
        info!(project = %project_id, "timer started");
        Ok(closed)
    }

    /// Stops the running timer. Stopping an idle timer does nothing.
    pub fn stop(&mut self) -> Result<Option<TimeSession>> {
        let now = self.clock.now();
        let Some(session) = self.close_running(now) else {
            debug!("stop requested while idle");
            return Ok(None);
        };
        self.commit(Some(&session), TimerState::Idle)?;
        info!(
            project = %session.project_id,
            session = %session.id,
            duration = session.duration,
            "timer stopped"
        );
        Ok(Some(session))
    }

    /// Removes a session. Returns `false` when no session had that id.
    pub fn delete_session(&mut self, id: &SessionId) -> Result<bool> {
        if self.ledger.get(id).is_none() {
            return Ok(false);
        }
        let mut ledger = self.ledger.clone();
        ledger.delete(id);
        let encoded = store::encode(SESSIONS_KEY, &ledger)?;
        if let Err(err) = self.store.save(SESSIONS_KEY, &encoded) {
            warn!(error = %err, session = %id, "failed to persist session delete");
            return Err(err);
        }
        self.ledger = ledger;
        info!(session = %id, "session deleted");
        Ok(true)
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn sessions_by_project<'a>(
        &'a self,
        project: &'a ProjectId,
    ) -> impl Iterator<Item = &'a TimeSession> + Clone + 'a {
        self.ledger.by_project(project)
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Local> {
        self.clock.now()
    }

    /// Live seconds of the running interval, 0 when idle.
    pub fn elapsed(&self) -> i64 {
        self.state
            .start_time()
            .map(|start| elapsed_since(start, self.clock.now()))
            .unwrap_or(0)
    }

    pub fn total_time(&self, project: &ProjectId) -> i64 {
        stats::total_time(self.ledger.as_slice(), &self.state, self.elapsed(), project)
    }

    pub fn today_time(&self) -> i64 {
        let now = self.clock.now();
        let elapsed = self
            .state
            .start_time()
            .map(|start| elapsed_since(start, now))
            .unwrap_or(0);
        stats::today_time(self.ledger.as_slice(), &self.state, elapsed, now.date_naive())
    }

    pub fn time_by_project(&self) -> Vec<(ProjectId, i64)> {
        stats::time_by_project(self.ledger.as_slice(), &self.state, self.elapsed())
    }

    fn close_running(&self, now: chrono::DateTime<chrono::Local>) -> Option<TimeSession> {
        match &self.state {
            TimerState::Running {
                project_id,
                start_time,
            } => Some(TimeSession::close(project_id.clone(), *start_time, now)),
            TimerState::Idle => None,
        }
    }

    fn commit(&mut self, closed: Option<&TimeSession>, next: TimerState) -> Result<()> {
        let mut entries = vec![(TIMER_KEY, store::encode(TIMER_KEY, &next)?)];
        let ledger = match closed {
            Some(session) => {
                let mut ledger = self.ledger.clone();
                ledger.append(session.clone());
                entries.push((SESSIONS_KEY, store::encode(SESSIONS_KEY, &ledger)?));
                Some(ledger)
            }
            None => None,
        };

        if let Err(err) = self.store.save_all(&entries) {
            warn!(error = %err, "failed to persist timer transition");
            return Err(err);
        }

        if let Some(ledger) = ledger {
            self.ledger = ledger;
        }
        self.state = next;
        Ok(())
    }
}
