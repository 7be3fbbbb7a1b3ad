use super::{events::RefreshEvent, states::RefreshState};
use crate::error::{SolderaError, SolderaResult};
use crate::models::JobId;

/// Single-job refresh lifecycle with a generation ticket
///
/// Every `Submit` and `Cancel` bumps the generation. Asynchronous work captures
/// the generation it started under and must drop its result when
/// [`is_current`](Self::is_current) no longer holds for that ticket.
#[derive(Debug, Default)]
pub struct RefreshStateMachine {
    state: RefreshState,
    generation: u64,
    job_id: Option<JobId>,
}

impl RefreshStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_state(&self) -> RefreshState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    /// Whether work started under `ticket` may still apply its result
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation == ticket
    }

    /// Apply an event, returning the new state
    pub fn transition(&mut self, event: &RefreshEvent) -> SolderaResult<RefreshState> {
        let target = Self::determine_target_state(self.state, event)?;

        match event {
            RefreshEvent::Submit => {
                self.generation += 1;
                self.job_id = None;
            }
            RefreshEvent::Enqueued(job_id) => self.job_id = Some(job_id.clone()),
            RefreshEvent::Cancel => {
                self.generation += 1;
                self.job_id = None;
            }
            RefreshEvent::Reset => self.job_id = None,
            _ => {}
        }

        self.state = target;
        Ok(target)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        current: RefreshState,
        event: &RefreshEvent,
    ) -> SolderaResult<RefreshState> {
        let target = match (current, event) {
            (RefreshState::Idle, RefreshEvent::Submit) => RefreshState::Enqueuing,

            (RefreshState::Enqueuing, RefreshEvent::Enqueued(_)) => RefreshState::Polling,
            (RefreshState::Enqueuing, RefreshEvent::SubmitFailed(_)) => RefreshState::Failed,

            (RefreshState::Polling, RefreshEvent::JobFinished) => RefreshState::Completed,
            (RefreshState::Polling, RefreshEvent::PollFailed(_)) => RefreshState::Failed,

            (RefreshState::Completed | RefreshState::Failed, RefreshEvent::Reset) => {
                RefreshState::Idle
            }

            (RefreshState::Idle | RefreshState::Enqueuing | RefreshState::Polling, RefreshEvent::Cancel) => {
                RefreshState::Idle
            }

            (from, event) => {
                return Err(SolderaError::InvalidTransition {
                    from: from.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
