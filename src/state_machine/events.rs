use crate::constants::events as names;
use crate::models::JobId;
use serde::{Deserialize, Serialize};

/// Events that drive the refresh orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RefreshEvent {
    /// A refresh was requested
    Submit,
    /// The backend accepted the job
    Enqueued(JobId),
    /// The submission failed
    SubmitFailed(String),
    /// A status check reported a finish timestamp
    JobFinished,
    /// A status check failed
    PollFailed(String),
    /// Return to idle after a terminal state
    Reset,
    /// The owning context was torn down
    Cancel,
}

impl RefreshEvent {
    /// Event name for logging and lifecycle publication
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Submit => names::REFRESH_REQUESTED,
            Self::Enqueued(_) => names::REFRESH_ENQUEUED,
            Self::SubmitFailed(_) => names::REFRESH_SUBMIT_FAILED,
            Self::JobFinished => names::JOB_FINISHED,
            Self::PollFailed(_) => names::JOB_POLL_FAILED,
            Self::Reset => names::REFRESH_RESET,
            Self::Cancel => names::REFRESH_CANCELLED,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::SubmitFailed(msg) | Self::PollFailed(msg) => Some(msg),
            _ => None,
        }
    }
}
