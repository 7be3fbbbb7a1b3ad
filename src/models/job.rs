use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a backend refresh job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of the refresh submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTicket {
    pub id: JobId,
}

/// Job status payload as the backend reports it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: Option<JobId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub enqueued_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub traceback: Option<String>,
    #[serde(default)]
    pub exception_class_path: Option<String>,
}

/// Lifecycle of a backend job, derived once from a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// A finished job, successful or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A refresh job with an explicit status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub enqueued_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Backend error class when the job itself failed
    pub failure: Option<String>,
}

impl Job {
    /// Build a job from a snapshot, falling back to `requested` when the payload omits the id
    pub fn from_snapshot(requested: &JobId, snapshot: JobSnapshot) -> Self {
        let status = match (&snapshot.finished_at, &snapshot.started_at) {
            (Some(_), _) => {
                let reported_failed = snapshot
                    .status
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case("failed"));
                if reported_failed || snapshot.exception_class_path.is_some() {
                    JobStatus::Failed
                } else {
                    JobStatus::Succeeded
                }
            }
            (None, Some(_)) => JobStatus::Running,
            (None, None) => JobStatus::Pending,
        };

        Self {
            id: snapshot.id.unwrap_or_else(|| requested.clone()),
            status,
            enqueued_at: snapshot.enqueued_at,
            started_at: snapshot.started_at,
            finished_at: snapshot.finished_at,
            failure: snapshot.exception_class_path,
        }
    }
}
