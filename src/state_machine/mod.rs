// State machine module for the refresh lifecycle
//
// Explicit states and events for the submit -> poll -> complete cycle, with a
// generation ticket so late responses from superseded work are discarded.

pub mod events;
pub mod refresh_state_machine;
pub mod states;

pub use events::RefreshEvent;
pub use refresh_state_machine::RefreshStateMachine;
pub use states::RefreshState;
