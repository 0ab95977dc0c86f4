//! Public engine API surface.
//!
//! This module gathers the types exposed to hosts of the runtime crate so
//! other layers can stay focused on scheduling and workers.

pub mod errors;
pub mod handle;

pub use errors::{EngineError, Result};
pub use handle::EngineHandle;
