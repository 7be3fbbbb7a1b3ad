//! Shared fixtures for integration tests: a scripted backend, recording hooks,
//! record builders and proptest strategies.

#![allow(dead_code)]

pub mod builders;
pub mod mock_api;
pub mod strategies;
