//! # Models
//!
//! Wire-level data carried between the backend and the core: auction batches and
//! refresh jobs.

pub mod auction;
pub mod job;

pub use auction::{AuctionRecord, AuctionResultSet, Technology};
pub use job::{Job, JobId, JobSnapshot, JobStatus, JobTicket};
