use crate::error::SolderaError;
use crate::models::Job;
use async_trait::async_trait;

/// Callbacks fired by the orchestrator when a refresh cycle ends
///
/// Exactly one of the two fires per started refresh, and neither fires once the
/// orchestrator has been shut down.
#[async_trait]
pub trait RefreshHooks: Send + Sync {
    /// The job reported a finish timestamp
    async fn on_refresh_complete(&self, job: &Job);

    /// Submission or a status check failed
    async fn on_refresh_failed(&self, error: &SolderaError);
}
