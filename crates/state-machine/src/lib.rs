//! Prioritized behavior-state scheduler.
//!
//! A [`StateMachine`] owns an ordered set of mutually exclusive
//! [`BehaviorState`]s. Every tick it asks each state, highest priority first,
//! whether it wants control; the first that does becomes active.
//!
//! - **One active state**: at most one state is entered at any time
//! - **Clean transitions**: the old state exits before the new one enters,
//!   and a state only runs after it has entered
//! - **No re-entry**: a state that stays eligible only runs again
//! - **Context-generic**: states receive a caller-defined context `C`, and
//!   phases may fail with a caller-defined error `E`
//!
//! # Architecture
//!
//! - [`BehaviorState`]: four-phase contract (check / enter / run / exit)
//! - [`StateMachine`]: priority selection and the transition protocol
//! - [`Step`]: what a single tick did, for logging and events

pub mod machine;
pub mod state;
pub mod step;

pub use machine::StateMachine;
pub use state::BehaviorState;
pub use step::Step;
