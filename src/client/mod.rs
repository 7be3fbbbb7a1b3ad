//! # Backend Client
//!
//! The collaborator boundary: an [`AuctionApi`] trait covering the three backend
//! calls the refresh cycle makes, and its HTTP implementation.

pub mod error;
pub mod http;
pub mod traits;

pub use error::{ClientError, ClientResult};
pub use http::HttpAuctionApi;
pub use traits::{AuctionApi, Credentials};
