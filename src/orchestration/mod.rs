//! # Orchestration
//!
//! The refresh cycle: submit a backend job, poll it to completion, then notify the
//! hooks so results can be re-fetched.

pub mod hooks;
pub mod task_orchestrator;

pub use hooks::RefreshHooks;
pub use task_orchestrator::TaskOrchestrator;
