use super::error::ClientResult;
use crate::models::{AuctionResultSet, JobId, JobSnapshot, JobTicket};
use async_trait::async_trait;
use std::fmt;

/// Anti-forgery credential attached to the refresh submission
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    csrf_token: Option<String>,
}

impl Credentials {
    pub fn new(csrf_token: Option<String>) -> Self {
        Self { csrf_token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[MASKED]"))
            .finish()
    }
}

/// Backend operations the refresh core depends on
#[async_trait]
pub trait AuctionApi: Send + Sync {
    /// All auction batches, newest first
    async fn list_auction_results(&self) -> ClientResult<Vec<AuctionResultSet>>;

    /// Enqueue a backend refresh job
    async fn submit_refresh(&self, credentials: &Credentials) -> ClientResult<JobTicket>;

    /// Current status of a refresh job
    async fn job_status(&self, job_id: &JobId) -> ClientResult<JobSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_masked() {
        let credentials = Credentials::new(Some("s3cr3t-token".to_string()));
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[MASKED]"));
        assert_eq!(credentials.csrf_token(), Some("s3cr3t-token"));
        assert_eq!(Credentials::anonymous().csrf_token(), None);
    }
}
