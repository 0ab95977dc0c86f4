//! Worker tasks that back the engine orchestration.
//!
//! The engine worker owns the state machine and runs the poll loop; hosts
//! reach it only through [`crate::EngineHandle`].

mod engine;

pub use engine::{Command, EngineWorker};
