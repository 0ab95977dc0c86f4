//! Cloneable façade for controlling the engine.
//!
//! [`EngineHandle`] hides channel plumbing and offers async helpers for
//! starting and stopping the poll loop or streaming events from specific
//! topics.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use farm_core::GameSession;
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{EngineError, Result};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Host-facing handle to the engine worker
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    working: Arc<AtomicBool>,
}

impl EngineHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        working: Arc<AtomicBool>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            working,
        }
    }

    /// Resume polling.
    ///
    /// Fails with [`EngineError::NoSession`] when no session is attached.
    /// Starting a running engine is a no-op.
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await?
    }

    /// Halt polling.
    ///
    /// Returns once the worker has exited the active state, so no state is
    /// left half-entered. Stopping a stopped engine is a no-op.
    pub async fn stop(&self) -> Result<()> {
        self.request(|reply| Command::Stop { reply }).await?
    }

    /// Start when stopped, stop when running.
    pub async fn toggle(&self) -> Result<()> {
        if self.is_working() {
            self.stop().await
        } else {
            self.start().await
        }
    }

    /// Attach (or replace) the game session the engine drives.
    pub async fn attach(&self, session: Arc<dyn GameSession>) -> Result<()> {
        self.request(|reply| Command::Attach { session, reply })
            .await
    }

    /// Stop the engine and end the worker task.
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Whether the poll loop is currently running.
    pub fn is_working(&self) -> bool {
        self.working.load(Ordering::Acquire)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Engine` - Started, stopped, paused, faulted
    /// - `Topic::State` - Behavior states entered and exited
    /// - `Topic::Action` - Abilities used or rejected
    /// - `Topic::Status` - Human-readable progress messages
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use farm_runtime::Topic;
    ///
    /// let mut status_rx = handle.subscribe(Topic::Status);
    /// while let Ok(event) = status_rx.recv().await {
    ///     // Render in the status bar
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| EngineError::CommandChannelClosed)?;

        reply_rx.await.map_err(EngineError::ReplyChannelClosed)
    }
}
