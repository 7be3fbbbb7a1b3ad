use serde::{Deserialize, Serialize};
use std::fmt;

/// Refresh orchestrator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshState {
    /// No job outstanding, a refresh may be started
    #[default]
    Idle,
    /// Submission request in flight
    Enqueuing,
    /// Job accepted, status checks running
    Polling,
    /// Job finished, completion hook pending
    Completed,
    /// Submission or status check failed
    Failed,
}

impl RefreshState {
    /// Completed and Failed are momentary: both reset to Idle
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// A job is being submitted or tracked
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Enqueuing | Self::Polling)
    }
}

impl fmt::Display for RefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Enqueuing => write!(f, "enqueuing"),
            Self::Polling => write!(f, "polling"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for RefreshState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(Self::Idle),
            "enqueuing" => Ok(Self::Enqueuing),
            "polling" => Ok(Self::Polling),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid refresh state: {s}")),
        }
    }
}
