//! # System Constants
//!
//! Fixed timings, endpoint paths, lifecycle event names, and the user-facing copy
//! shown by the notification slot.

use std::time::Duration;

/// Interval between two job status checks
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Lifetime of a success/info notification before it hides itself
pub const NOTIFICATION_AUTO_HIDE: Duration = Duration::from_millis(3000);

/// Backend endpoint paths, relative to the configured base URL
pub mod endpoints {
    pub const AUCTION_RESULTS: &str = "api/auction-results";
    pub const REFRESH: &str = "api/auction-results/refresh";
    pub const TASKS: &str = "api/tasks";

    pub const CSRF_HEADER: &str = "X-CSRFToken";
    pub const CSRF_COOKIE: &str = "csrftoken";
}

/// Lifecycle events published by the refresh orchestrator
pub mod events {
    pub const REFRESH_REQUESTED: &str = "refresh.requested";
    pub const REFRESH_ENQUEUED: &str = "refresh.enqueued";
    pub const REFRESH_SUBMIT_FAILED: &str = "refresh.submit_failed";
    pub const JOB_FINISHED: &str = "job.finished";
    pub const JOB_POLL_FAILED: &str = "job.poll_failed";
    pub const REFRESH_RESET: &str = "refresh.reset";
    pub const REFRESH_CANCELLED: &str = "refresh.cancelled";
}

/// User-facing notification copy
pub mod messages {
    pub const NEW_RESULTS_FOUND: &str =
        "Auction results refreshed. New results found, check the auction dropdown for new auctions.";
    pub const NO_NEW_RESULTS: &str = "Auction results refreshed. No new results found.";

    pub const TITLE_REFRESHED: &str = "Results refreshed";
    pub const TITLE_ERROR: &str = "An error occurred";

    pub const LABEL_FETCH: &str = "Fetch results";
    pub const LABEL_CHECK_UPDATES: &str = "Check for updates";
}
