//! # Task Orchestrator
//!
//! Drives one backend refresh job at a time: submit, poll its status on a fixed
//! interval, and hand the outcome to the [`RefreshHooks`].
//!
//! The poll loop is a single spawned task that awaits each status check before
//! waiting for the next tick, so checks never overlap. Every result is matched
//! against the generation ticket captured at submission; after `shutdown` (or
//! drop) the ticket is stale and late responses are discarded without firing
//! hooks.

use super::hooks::RefreshHooks;
use crate::client::{AuctionApi, Credentials};
use crate::constants::POLL_INTERVAL;
use crate::error::{SolderaError, SolderaResult};
use crate::events::{EventPublisher, LifecycleEvent};
use crate::logging::log_job_operation;
use crate::models::{Job, JobId};
use crate::state_machine::{RefreshEvent, RefreshState, RefreshStateMachine};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Inner {
    machine: RefreshStateMachine,
    poller: Option<JoinHandle<()>>,
}

struct Shared {
    orchestrator_id: Uuid,
    api: Arc<dyn AuctionApi>,
    hooks: Arc<dyn RefreshHooks>,
    credentials: Credentials,
    publisher: EventPublisher,
    poll_interval: Duration,
    inner: Mutex<Inner>,
}

impl Shared {
    /// Apply an event and publish the transition
    fn apply(&self, inner: &mut Inner, event: RefreshEvent) -> SolderaResult<RefreshState> {
        let from = inner.machine.current_state();
        let job_id = match &event {
            RefreshEvent::Enqueued(id) => Some(id.clone()),
            _ => inner.machine.job_id().cloned(),
        };
        let to = inner.machine.transition(&event)?;

        debug!(
            orchestrator_id = %self.orchestrator_id,
            from = %from,
            to = %to,
            event = event.event_type(),
            generation = inner.machine.generation(),
            "Refresh transition"
        );
        self.publisher
            .publish(LifecycleEvent::from_transition(from, to, &event, job_id));

        Ok(to)
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.inner.lock().machine.is_current(ticket)
    }

    /// Move a still-current cycle through a terminal state back to Idle
    ///
    /// Returns false when the ticket is stale and nothing was applied.
    fn conclude(&self, ticket: u64, event: RefreshEvent) -> bool {
        let mut inner = self.inner.lock();
        if !inner.machine.is_current(ticket) {
            debug!(
                orchestrator_id = %self.orchestrator_id,
                ticket,
                "Discarding outcome of a superseded refresh"
            );
            return false;
        }

        let concluded = self
            .apply(&mut inner, event)
            .and_then(|_| self.apply(&mut inner, RefreshEvent::Reset));
        // The poll task may be the caller; release the handle without aborting
        inner.poller = None;

        match concluded {
            Ok(_) => true,
            Err(e) => {
                error!(orchestrator_id = %self.orchestrator_id, error = %e, "Failed to conclude refresh");
                false
            }
        }
    }
}

pub struct TaskOrchestrator {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for TaskOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.lock();
        f.debug_struct("TaskOrchestrator")
            .field("orchestrator_id", &self.shared.orchestrator_id)
            .field("state", &inner.machine.current_state())
            .field("job_id", &inner.machine.job_id())
            .field("poll_interval", &self.shared.poll_interval)
            .finish()
    }
}

impl TaskOrchestrator {
    pub fn new(
        api: Arc<dyn AuctionApi>,
        hooks: Arc<dyn RefreshHooks>,
        credentials: Credentials,
    ) -> Self {
        Self::build(api, hooks, credentials, POLL_INTERVAL)
    }

    /// Build an orchestrator with a custom poll interval
    ///
    /// Fails with `ConfigurationError` for a zero interval.
    pub fn with_poll_interval(
        api: Arc<dyn AuctionApi>,
        hooks: Arc<dyn RefreshHooks>,
        credentials: Credentials,
        poll_interval: Duration,
    ) -> SolderaResult<Self> {
        if poll_interval.is_zero() {
            return Err(SolderaError::ConfigurationError(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self::build(api, hooks, credentials, poll_interval))
    }

    fn build(
        api: Arc<dyn AuctionApi>,
        hooks: Arc<dyn RefreshHooks>,
        credentials: Credentials,
        poll_interval: Duration,
    ) -> Self {
        let orchestrator_id = Uuid::new_v4();
        info!(
            orchestrator_id = %orchestrator_id,
            poll_interval_ms = poll_interval.as_millis() as u64,
            "Creating TaskOrchestrator"
        );

        Self {
            shared: Arc::new(Shared {
                orchestrator_id,
                api,
                hooks,
                credentials,
                publisher: EventPublisher::default(),
                poll_interval,
                inner: Mutex::new(Inner::default()),
            }),
        }
    }

    /// Submit a refresh job and start polling it
    ///
    /// Fails with `InvalidTransition` if a refresh is already outstanding. On
    /// submission failure the error is handed to the hooks and returned; the
    /// orchestrator is back in `Idle` either way.
    pub async fn start_refresh(&self) -> SolderaResult<JobId> {
        let ticket = {
            let mut inner = self.shared.inner.lock();
            self.shared.apply(&mut inner, RefreshEvent::Submit)?;
            inner.machine.generation()
        };
        log_job_operation("submit_refresh", None, "enqueuing", None);

        let submitted = self.shared.api.submit_refresh(&self.shared.credentials).await;

        let job_id = match submitted {
            Ok(job_ticket) => job_ticket.id,
            Err(e) => {
                let detail = e.detail();
                let error = SolderaError::submit_failed(detail.clone());
                log_job_operation("submit_refresh", None, "failed", Some(&detail));
                if !self
                    .shared
                    .conclude(ticket, RefreshEvent::SubmitFailed(detail))
                {
                    return Err(SolderaError::Cancelled);
                }
                self.shared.hooks.on_refresh_failed(&error).await;
                return Err(error);
            }
        };

        let mut inner = self.shared.inner.lock();
        if !inner.machine.is_current(ticket) {
            warn!(job_id = %job_id, "Refresh job accepted after shutdown, not polling it");
            return Err(SolderaError::Cancelled);
        }
        self.shared
            .apply(&mut inner, RefreshEvent::Enqueued(job_id.clone()))?;
        inner.poller = Some(tokio::spawn(Self::poll_job(
            Arc::clone(&self.shared),
            ticket,
            job_id.clone(),
        )));
        log_job_operation("submit_refresh", Some(job_id.as_str()), "polling", None);

        Ok(job_id)
    }

    async fn poll_job(shared: Arc<Shared>, ticket: u64, job_id: JobId) {
        let period = shared.poll_interval;
        // First check one full interval after the job was accepted
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempt: u64 = 0;

        loop {
            interval.tick().await;
            attempt += 1;
            if !shared.is_current(ticket) {
                return;
            }

            let result = shared.api.job_status(&job_id).await;
            if !shared.is_current(ticket) {
                debug!(job_id = %job_id, attempt, "Discarding job status from a superseded refresh");
                return;
            }

            match result {
                Ok(snapshot) => {
                    let job = Job::from_snapshot(&job_id, snapshot);
                    debug!(job_id = %job_id, attempt, status = %job.status, "Polled refresh job");
                    if !job.status.is_terminal() {
                        continue;
                    }

                    if shared.conclude(ticket, RefreshEvent::JobFinished) {
                        log_job_operation(
                            "poll_job",
                            Some(job_id.as_str()),
                            "completed",
                            Some(&format!("status={} attempts={attempt}", job.status)),
                        );
                        shared.hooks.on_refresh_complete(&job).await;
                    }
                    return;
                }
                Err(e) => {
                    let detail = e.detail();
                    log_job_operation("poll_job", Some(job_id.as_str()), "failed", Some(&detail));
                    let error = SolderaError::poll_failed(detail.clone());
                    if shared.conclude(ticket, RefreshEvent::PollFailed(detail)) {
                        shared.hooks.on_refresh_failed(&error).await;
                    }
                    return;
                }
            }
        }
    }

    /// Stop polling and discard any in-flight response
    pub fn shutdown(&self) {
        let mut inner = self.shared.inner.lock();
        if let Some(handle) = inner.poller.take() {
            handle.abort();
        }
        if let Err(e) = self.shared.apply(&mut inner, RefreshEvent::Cancel) {
            warn!(orchestrator_id = %self.shared.orchestrator_id, error = %e, "Cancel rejected");
        }
    }

    pub fn state(&self) -> RefreshState {
        self.shared.inner.lock().machine.current_state()
    }

    pub fn current_job(&self) -> Option<JobId> {
        self.shared.inner.lock().machine.job_id().cloned()
    }

    /// Whether a refresh is being submitted or tracked
    pub fn is_busy(&self) -> bool {
        self.state().is_active()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.shared.publisher.subscribe()
    }
}

impl Drop for TaskOrchestrator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
