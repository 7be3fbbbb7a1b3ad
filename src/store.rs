//! # Results Store
//!
//! Holds the latest fetched auction batches, the user's selected batch date, and
//! the summaries derived from that selection. Summaries are recomputed in full
//! whenever the batches or the selection change.

use crate::aggregation::{self, BatchSummary};
use crate::client::AuctionApi;
use crate::constants::messages;
use crate::error::{SolderaError, SolderaResult};
use crate::logging::log_fetch_operation;
use crate::models::{AuctionResultSet, Job, JobStatus};
use crate::notifications::{NotificationCenter, Severity};
use crate::orchestration::RefreshHooks;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Observable store contents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSnapshot {
    /// `None` until the first successful fetch
    pub results: Option<Vec<AuctionResultSet>>,
    pub selected: Option<String>,
    /// Summary of the selected batch, `None` when nothing matches
    pub summary: Option<BatchSummary>,
}

/// What a successful fetch changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The backend returned no batches
    Empty,
    /// First load: the newest batch was selected
    AutoSelected(String),
    /// The number of batches changed since the previous fetch
    NewResults,
    /// Same number of batches as before
    NoNewResults,
}

pub struct ResultsStore {
    api: Arc<dyn AuctionApi>,
    notifications: NotificationCenter,
    state: Mutex<StoreSnapshot>,
    sender: watch::Sender<StoreSnapshot>,
}

impl std::fmt::Debug for ResultsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ResultsStore")
            .field("batches", &state.results.as_ref().map(Vec::len))
            .field("selected", &state.selected)
            .finish()
    }
}

impl ResultsStore {
    pub fn new(api: Arc<dyn AuctionApi>, notifications: NotificationCenter) -> Self {
        let (sender, _) = watch::channel(StoreSnapshot::default());
        Self {
            api,
            notifications,
            state: Mutex::new(StoreSnapshot::default()),
            sender,
        }
    }

    /// Fetch all batches and report the outcome through the notification slot
    pub async fn fetch_results(&self) -> SolderaResult<FetchOutcome> {
        let batches = match self.api.list_auction_results().await {
            Ok(batches) => batches,
            Err(e) => {
                let error = SolderaError::fetch_failed(e.detail());
                warn!(status = ?e.status(), error = %e, "Listing auction results failed");
                log_fetch_operation("fetch_results", None, None, "failed", Some(&e.to_string()));
                self.notifications.show(error.to_string(), Severity::Error);
                return Err(error);
            }
        };

        let count = batches.len();
        let (outcome, selected) = {
            let mut state = self.state.lock();
            let previous_count = state.results.as_ref().map(Vec::len);

            let had_selection = state.selected.is_some();

            let outcome = match (batches.first(), had_selection) {
                (None, _) => FetchOutcome::Empty,
                (Some(newest), false) => {
                    state.selected = Some(newest.date.clone());
                    FetchOutcome::AutoSelected(newest.date.clone())
                }
                (Some(_), true) if previous_count != Some(count) => FetchOutcome::NewResults,
                (Some(_), true) => FetchOutcome::NoNewResults,
            };

            state.results = Some(batches);
            state.summary = Self::recompute(&state);
            self.sender.send_replace(state.clone());
            (outcome, state.selected.clone())
        };

        log_fetch_operation(
            "fetch_results",
            Some(count),
            selected.as_deref(),
            "succeeded",
            Some(&format!("{outcome:?}")),
        );

        match outcome {
            FetchOutcome::NewResults => {
                self.notifications
                    .show(messages::NEW_RESULTS_FOUND, Severity::Success);
            }
            FetchOutcome::NoNewResults => {
                self.notifications.show(messages::NO_NEW_RESULTS, Severity::Info);
            }
            FetchOutcome::Empty | FetchOutcome::AutoSelected(_) => {}
        }

        Ok(outcome)
    }

    /// Select the batch for `date` and return its fresh summary
    pub fn select_batch(&self, date: impl Into<String>) -> Option<BatchSummary> {
        let date = date.into();
        let mut state = self.state.lock();
        state.selected = Some(date.clone());
        state.summary = Self::recompute(&state);
        self.sender.send_replace(state.clone());

        debug!(date = %date, found = state.summary.is_some(), "Batch selected");
        state.summary.clone()
    }

    fn recompute(state: &StoreSnapshot) -> Option<BatchSummary> {
        let results = state.results.as_ref()?;
        let selected = state.selected.as_deref()?;
        let batch = AuctionResultSet::find_by_date(results, selected)?;

        for problem in aggregation::invalid_records(&batch.records) {
            warn!(date = %batch.date, error = %problem, "Aggregating record outside expected domain");
        }

        Some(aggregation::summarize(batch))
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.lock().clone()
    }

    pub fn selected(&self) -> Option<String> {
        self.state.lock().selected.clone()
    }

    pub fn summary(&self) -> Option<BatchSummary> {
        self.state.lock().summary.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.sender.subscribe()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }
}

#[async_trait]
impl RefreshHooks for ResultsStore {
    async fn on_refresh_complete(&self, job: &Job) {
        if job.status == JobStatus::Failed {
            warn!(
                job_id = %job.id,
                failure = job.failure.as_deref().unwrap_or("unknown"),
                "Refresh job finished with a failure, re-fetching anyway"
            );
        }
        // Failures are already reported through the notification slot
        let _ = self.fetch_results().await;
    }

    async fn on_refresh_failed(&self, error: &SolderaError) {
        self.notifications.show(error.to_string(), Severity::Error);
    }
}
