//! Scripted `AuctionApi` and recording `RefreshHooks`

use async_trait::async_trait;
use parking_lot::Mutex;
use soldera_core::client::{AuctionApi, ClientError, ClientResult, Credentials};
use soldera_core::models::{AuctionResultSet, Job, JobId, JobSnapshot, JobTicket};
use soldera_core::{RefreshHooks, SolderaError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub enum ListReply {
    Batches(Vec<AuctionResultSet>),
    Error(u16, String),
}

#[derive(Debug, Clone)]
pub enum SubmitReply {
    Accepted(String),
    Error(u16, String),
}

#[derive(Debug, Clone)]
pub enum StatusReply {
    Pending,
    Running,
    Finished,
    FinishedWithFailure,
    Error(u16, String),
}

/// Pops scripted replies in order; the last reply repeats once the script runs out
#[derive(Debug)]
struct Script<T: Clone>(Mutex<VecDeque<T>>);

impl<T: Clone> Script<T> {
    fn new(replies: Vec<T>) -> Self {
        Self(Mutex::new(replies.into()))
    }

    fn next(&self) -> Option<T> {
        let mut queue = self.0.lock();
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[derive(Debug)]
pub struct MockAuctionApi {
    lists: Script<ListReply>,
    submits: Script<SubmitReply>,
    statuses: Script<StatusReply>,
    status_delay: Option<Duration>,
    pub list_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub status_started: Mutex<Vec<Instant>>,
    pub last_credentials: Mutex<Option<Credentials>>,
}

impl MockAuctionApi {
    pub fn new() -> Self {
        Self {
            lists: Script::new(vec![ListReply::Batches(vec![])]),
            submits: Script::new(vec![SubmitReply::Accepted("job-1".to_string())]),
            statuses: Script::new(vec![StatusReply::Finished]),
            status_delay: None,
            list_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            status_started: Mutex::new(Vec::new()),
            last_credentials: Mutex::new(None),
        }
    }

    pub fn with_lists(mut self, replies: Vec<ListReply>) -> Self {
        self.lists = Script::new(replies);
        self
    }

    pub fn with_submits(mut self, replies: Vec<SubmitReply>) -> Self {
        self.submits = Script::new(replies);
        self
    }

    pub fn with_statuses(mut self, replies: Vec<StatusReply>) -> Self {
        self.statuses = Script::new(replies);
        self
    }

    /// Delay every status response, simulating a slow backend
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Most status checks ever outstanding at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

fn timestamp() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

#[async_trait]
impl AuctionApi for MockAuctionApi {
    async fn list_auction_results(&self) -> ClientResult<Vec<AuctionResultSet>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.lists.next() {
            Some(ListReply::Batches(batches)) => Ok(batches),
            Some(ListReply::Error(status, message)) => Err(ClientError::api_error(status, message)),
            None => Ok(vec![]),
        }
    }

    async fn submit_refresh(&self, credentials: &Credentials) -> ClientResult<JobTicket> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock() = Some(credentials.clone());
        match self.submits.next() {
            Some(SubmitReply::Accepted(id)) => Ok(JobTicket { id: JobId::new(id) }),
            Some(SubmitReply::Error(status, message)) => {
                Err(ClientError::api_error(status, message))
            }
            None => Err(ClientError::api_error(500, "no script")),
        }
    }

    async fn job_status(&self, job_id: &JobId) -> ClientResult<JobSnapshot> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_started.lock().push(Instant::now());
        let outstanding = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(outstanding, Ordering::SeqCst);

        let reply = self.statuses.next();
        if let Some(delay) = self.status_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut snapshot = JobSnapshot {
            id: Some(job_id.clone()),
            enqueued_at: Some(timestamp()),
            ..JobSnapshot::default()
        };
        match reply {
            Some(StatusReply::Pending) => {}
            Some(StatusReply::Running) => snapshot.started_at = Some(timestamp()),
            Some(StatusReply::Finished) => {
                snapshot.started_at = Some(timestamp());
                snapshot.finished_at = Some(timestamp());
                snapshot.status = Some("SUCCEEDED".to_string());
            }
            Some(StatusReply::FinishedWithFailure) => {
                snapshot.started_at = Some(timestamp());
                snapshot.finished_at = Some(timestamp());
                snapshot.status = Some("FAILED".to_string());
                snapshot.exception_class_path = Some("soldera.scraper.ScraperException".to_string());
            }
            Some(StatusReply::Error(status, message)) => {
                return Err(ClientError::api_error(status, message))
            }
            None => {}
        }
        Ok(snapshot)
    }
}

/// Hooks that record every call and wake waiters
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub completed: Mutex<Vec<(Job, Instant)>>,
    pub failed: Mutex<Vec<SolderaError>>,
    notify: Notify,
}

impl RecordingHooks {
    pub fn completions(&self) -> usize {
        self.completed.lock().len()
    }

    pub fn failures(&self) -> Vec<SolderaError> {
        self.failed.lock().clone()
    }

    /// Wait until any hook has fired
    pub async fn wait(&self) {
        loop {
            if self.completions() + self.failed.lock().len() > 0 {
                return;
            }
            self.notify.notified().await;
        }
    }
}

#[async_trait]
impl RefreshHooks for RecordingHooks {
    async fn on_refresh_complete(&self, job: &Job) {
        self.completed.lock().push((job.clone(), Instant::now()));
        self.notify.notify_one();
    }

    async fn on_refresh_failed(&self, error: &SolderaError) {
        self.failed.lock().push(error.clone());
        self.notify.notify_one();
    }
}
