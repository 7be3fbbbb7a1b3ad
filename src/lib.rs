#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Soldera Core
//!
//! Refresh orchestration and aggregation for French Guarantees of Origin auction
//! results.
//!
//! ## Overview
//!
//! The backend publishes auction results as batches, one per auction date. A
//! refresh is a backend job that scrapes for new batches; this crate submits that
//! job, polls it until it finishes, re-fetches the batches, and folds the
//! selected batch into per-technology and per-region summaries.
//!
//! ## Module Organization
//!
//! - [`aggregation`] - Pure folds from auction records to summary tables
//! - [`orchestration`] - Single-job refresh cycle with a fixed-interval poll loop
//! - [`state_machine`] - Refresh states, events and the generation ticket
//! - [`notifications`] - The auto-expiring message slot
//! - [`store`] - Fetched batches, the current selection and its summary
//! - [`dashboard`] - Facade exposing observable state and user actions
//! - [`client`] - Backend collaborator trait and its HTTP implementation
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`events`] - Lifecycle event broadcasting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soldera_core::{AuctionDashboard, SolderaConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SolderaConfig::load(None)?;
//! let dashboard = AuctionDashboard::from_config(&config)?;
//!
//! let (_fetched, _job) = dashboard.bootstrap().await;
//! if let Some(summary) = dashboard.summary() {
//!     for tech in &summary.by_technology {
//!         println!("{}: {} MWh sold", tech.technology.label(), tech.volume_sold);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # Unit and integration tests
//! ```

pub mod aggregation;
pub mod client;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod orchestration;
pub mod state_machine;
pub mod store;

pub use aggregation::{
    aggregate_by_region, aggregate_by_technology, summarize, BatchSummary, RegionSummary,
    TechnologySummary,
};
pub use client::{AuctionApi, ClientError, Credentials, HttpAuctionApi};
pub use config::SolderaConfig;
pub use dashboard::{AuctionDashboard, CycleWatch, DashboardSnapshot};
pub use error::{SolderaError, SolderaResult};
pub use models::{AuctionRecord, AuctionResultSet, Job, JobId, JobStatus, Technology};
pub use notifications::{Notification, NotificationCenter, Severity};
pub use orchestration::{RefreshHooks, TaskOrchestrator};
pub use state_machine::RefreshState;
pub use store::{FetchOutcome, ResultsStore};
