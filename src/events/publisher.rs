use crate::models::JobId;
use crate::state_machine::{RefreshEvent, RefreshState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Broadcast publisher for refresh lifecycle transitions
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<LifecycleEvent>,
}

/// One applied state transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleEvent {
    pub name: &'static str,
    pub from: RefreshState,
    pub to: RefreshState,
    pub job_id: Option<JobId>,
    pub detail: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl LifecycleEvent {
    pub fn from_transition(
        from: RefreshState,
        to: RefreshState,
        event: &RefreshEvent,
        job_id: Option<JobId>,
    ) -> Self {
        Self {
            name: event.event_type(),
            from,
            to,
            job_id,
            detail: event.error_message().map(str::to_string),
            published_at: Utc::now(),
        }
    }
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to every current subscriber
    pub fn publish(&self, event: LifecycleEvent) {
        // send() only fails without subscribers, which is fine for lifecycle events
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(256)
    }
}
