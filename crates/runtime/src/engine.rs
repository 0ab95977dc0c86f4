//! High-level engine orchestrator.
//!
//! The engine owns the background worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to drive the farming loop.
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use farm_core::{ActionCatalog, GameSession, SharedConfig};
use state_machine::StateMachine;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::api::{EngineError, EngineHandle, Result};
use crate::config::EngineConfig;
use crate::events::{Event, EventBus, Topic};
use crate::states::{FarmState, default_states};
use crate::workers::{Command, EngineWorker};

/// Main engine that runs the behavior states against a game session
///
/// Design: Engine owns the worker task. [`EngineHandle`] provides a
/// cloneable façade for hosts.
pub struct Engine {
    handle: EngineHandle,
    worker_handle: JoinHandle<()>,
}

impl Engine {
    /// Create a new engine builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Get a cloneable handle to this engine
    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Stop the engine and wait for the worker to finish
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining below reports the real outcome.
        let _ = self.handle.shutdown().await;
        self.worker_handle
            .await
            .map_err(EngineError::WorkerJoin)
    }
}

/// Builder for [`Engine`] with flexible configuration.
pub struct EngineBuilder {
    config: EngineConfig,
    catalog: Option<Arc<dyn ActionCatalog>>,
    shared_config: Option<SharedConfig>,
    session: Option<Arc<dyn GameSession>>,
    states: Option<Vec<FarmState>>,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            catalog: None,
            shared_config: None,
            session: None,
            states: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required ability catalog
    pub fn catalog(mut self, catalog: Arc<dyn ActionCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Share the user-editable configuration with the host (optional)
    ///
    /// Defaults to an empty [`farm_core::FarmConfig`].
    pub fn shared_config(mut self, config: SharedConfig) -> Self {
        self.shared_config = Some(config);
        self
    }

    /// Attach a session up front (optional)
    ///
    /// Without one, [`EngineHandle::attach`] must be called before starting.
    pub fn session(mut self, session: Arc<dyn GameSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the standard state set (optional)
    pub fn states(mut self, states: Vec<FarmState>) -> Self {
        self.states = Some(states);
        self
    }

    /// Build the engine and spawn its worker on the current tokio runtime
    pub fn build(self) -> Result<Engine> {
        let catalog = self.catalog.ok_or(EngineError::MissingCatalog)?;
        let config = self.config.normalized();

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let working = Arc::new(AtomicBool::new(false));

        let handle = EngineHandle::new(command_tx, event_bus.clone(), Arc::clone(&working));

        let machine = StateMachine::new(self.states.unwrap_or_else(default_states));
        let worker = EngineWorker::new(
            machine,
            self.session,
            catalog,
            self.shared_config.unwrap_or_default(),
            config,
            command_rx,
            event_bus,
            working,
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Engine {
            handle,
            worker_handle,
        })
    }
}
