//! Topic-based event bus for engine events.
//!
//! The engine publishes lifecycle changes, state transitions, dispatched
//! actions and human-readable status lines to separate topics so a host can
//! subscribe only to what it renders.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ActionEvent, EngineEvent, StateEvent};
