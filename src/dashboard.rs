//! # Auction Dashboard
//!
//! The UI-facing facade. Wires the results store, the refresh orchestrator and the
//! notification slot together and exposes their state as observable values plus
//! the `refresh` and `select` actions.

use crate::aggregation::BatchSummary;
use crate::client::{AuctionApi, HttpAuctionApi};
use crate::config::SolderaConfig;
use crate::constants::{events, messages};
use crate::error::{SolderaError, SolderaResult};
use crate::events::LifecycleEvent;
use crate::models::JobId;
use crate::notifications::{Notification, NotificationCenter};
use crate::orchestration::{RefreshHooks, TaskOrchestrator};
use crate::state_machine::RefreshState;
use crate::store::{FetchOutcome, ResultsStore, StoreSnapshot};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::warn;

/// Everything a view needs to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub store: StoreSnapshot,
    pub notification: Notification,
    pub refresh_state: RefreshState,
    pub refresh_enabled: bool,
    pub refresh_label: &'static str,
}

#[derive(Debug)]
pub struct AuctionDashboard {
    store: Arc<ResultsStore>,
    orchestrator: TaskOrchestrator,
    notifications: NotificationCenter,
}

impl AuctionDashboard {
    /// Wire the components for `config`, which is validated first
    pub fn new(api: Arc<dyn AuctionApi>, config: &SolderaConfig) -> SolderaResult<Self> {
        config.validate()?;
        let notifications = NotificationCenter::new(config.notifications.auto_hide());
        let store = Arc::new(ResultsStore::new(Arc::clone(&api), notifications.clone()));
        let hooks: Arc<dyn RefreshHooks> = store.clone();
        let orchestrator = TaskOrchestrator::with_poll_interval(
            api,
            hooks,
            config.api.credentials(),
            config.polling.interval(),
        )?;

        Ok(Self {
            store,
            orchestrator,
            notifications,
        })
    }

    /// Build a dashboard backed by the HTTP client
    pub fn from_config(config: &SolderaConfig) -> SolderaResult<Self> {
        let api = HttpAuctionApi::new(&config.api)
            .map_err(|e| SolderaError::ConfigurationError(e.to_string()))?;
        Self::new(Arc::new(api), config)
    }

    /// Initial load: fetch current results and start a refresh side by side
    pub async fn bootstrap(&self) -> (SolderaResult<FetchOutcome>, SolderaResult<JobId>) {
        futures::join!(self.store.fetch_results(), self.orchestrator.start_refresh())
    }

    pub async fn refresh(&self) -> SolderaResult<JobId> {
        self.orchestrator.start_refresh().await
    }

    pub async fn fetch(&self) -> SolderaResult<FetchOutcome> {
        self.store.fetch_results().await
    }

    pub fn select(&self, date: impl Into<String>) -> Option<BatchSummary> {
        self.store.select_batch(date)
    }

    pub fn dismiss_notification(&self) {
        self.notifications.hide();
    }

    /// False while a refresh job is outstanding
    pub fn refresh_enabled(&self) -> bool {
        !self.orchestrator.is_busy()
    }

    pub fn refresh_label(&self) -> &'static str {
        if self.store.selected().is_some() {
            messages::LABEL_CHECK_UPDATES
        } else {
            messages::LABEL_FETCH
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let refresh_state = self.orchestrator.state();
        DashboardSnapshot {
            store: self.store.snapshot(),
            notification: self.notifications.current(),
            refresh_state,
            refresh_enabled: !refresh_state.is_active(),
            refresh_label: self.refresh_label(),
        }
    }

    pub fn summary(&self) -> Option<BatchSummary> {
        self.store.summary()
    }

    pub fn subscribe_results(&self) -> watch::Receiver<StoreSnapshot> {
        self.store.subscribe()
    }

    pub fn subscribe_notifications(&self) -> watch::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub fn subscribe_lifecycle(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.orchestrator.subscribe()
    }

    /// Receivers for waiting on the next refresh cycle
    pub fn watch_cycle(&self) -> CycleWatch {
        CycleWatch {
            lifecycle: self.orchestrator.subscribe(),
            results: self.store.subscribe(),
            notifications: self.notifications.subscribe(),
        }
    }

    /// Stop any polling; late responses are discarded
    pub fn shutdown(&self) {
        self.orchestrator.shutdown();
    }
}

/// Waits for one refresh cycle to end and for its hook to publish the outcome
///
/// Take it before starting the refresh so no lifecycle event is missed.
#[derive(Debug)]
pub struct CycleWatch {
    lifecycle: broadcast::Receiver<LifecycleEvent>,
    results: watch::Receiver<StoreSnapshot>,
    notifications: watch::Receiver<Notification>,
}

impl CycleWatch {
    /// Ignore store and notification changes made so far
    pub fn arm(&mut self) {
        self.results.borrow_and_update();
        self.notifications.borrow_and_update();
    }

    /// Resolve once the cycle is back to idle and its outcome is visible
    ///
    /// The lifecycle reset is published before the hooks run, so a finished
    /// job waits for the re-fetch and a failed status check waits for the
    /// error notification. Submission failures are reported before
    /// `start_refresh` returns and need no wait.
    pub async fn settled(mut self) {
        let mut outcome = None;
        loop {
            match self.lifecycle.recv().await {
                Ok(event) => match event.name {
                    events::JOB_FINISHED | events::JOB_POLL_FAILED => outcome = Some(event.name),
                    events::REFRESH_RESET | events::REFRESH_CANCELLED => break,
                    _ => {}
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Lifecycle receiver lagged behind refresh events");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }

        match outcome {
            Some(events::JOB_FINISHED) => {
                tokio::select! {
                    _ = self.results.changed() => {}
                    _ = self.notifications.changed() => {}
                }
            }
            Some(events::JOB_POLL_FAILED) => {
                let _ = self.notifications.changed().await;
            }
            _ => {}
        }
    }
}
