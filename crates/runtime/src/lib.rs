//! Runtime orchestration for the farming engine.
//!
//! This crate wires the behavior states, the action executor and the worker
//! task into a cohesive engine API. Hosts embed [`Engine`] to run the poll
//! loop, subscribe to events, and start or stop farming through
//! [`EngineHandle`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream hosts interact with
//! - [`events`] provides the topic-based event bus
//! - [`states`] holds the concrete behavior states
//! - [`executor`] and [`context`] are what states act through
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod context;
pub mod engine;
pub mod events;
pub mod executor;
pub mod states;

mod workers;

pub use api::{EngineError, EngineHandle, Result};
pub use config::{EngineConfig, MIN_TICK_INTERVAL};
pub use context::{CombatContext, FarmContext};
pub use engine::{Engine, EngineBuilder};
pub use events::{ActionEvent, EngineEvent, Event, EventBus, StateEvent, Topic};
pub use executor::{Dispatch, Executor};
pub use states::{FarmState, default_states};
