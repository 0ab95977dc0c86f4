//! Engine worker that owns the state machine and the combat context.
//!
//! Receives commands from [`crate::EngineHandle`], polls the behavior states
//! on a fixed interval while working, and publishes events to the EventBus.
//! Commands are only observed between ticks, so a stop never cuts a running
//! phase short.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use farm_core::{ActionCatalog, GameSession, SessionError, SharedConfig};
use state_machine::{StateMachine, Step};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::{EngineError, Result};
use crate::config::EngineConfig;
use crate::context::FarmContext;
use crate::events::{EngineEvent, Event, EventBus, StateEvent};
use crate::executor::Executor;

/// Commands that can be sent to the engine worker
pub enum Command {
    /// Resume polling.
    Start { reply: oneshot::Sender<Result<()>> },
    /// Halt polling after exiting the active state.
    Stop { reply: oneshot::Sender<Result<()>> },
    /// Attach or replace the game session.
    Attach {
        session: Arc<dyn GameSession>,
        reply: oneshot::Sender<()>,
    },
    /// Stop and end the worker loop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task driving the behavior states.
pub struct EngineWorker {
    machine: StateMachine<FarmContext, SessionError>,
    context: Option<FarmContext>,
    catalog: Arc<dyn ActionCatalog>,
    config: SharedConfig,
    settings: EngineConfig,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    working: Arc<AtomicBool>,
}

impl EngineWorker {
    /// Creates a new engine worker.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        machine: StateMachine<FarmContext, SessionError>,
        session: Option<Arc<dyn GameSession>>,
        catalog: Arc<dyn ActionCatalog>,
        config: SharedConfig,
        settings: EngineConfig,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        working: Arc<AtomicBool>,
    ) -> Self {
        info!(
            target: "farm::engine",
            states = ?machine.names().collect::<Vec<_>>(),
            tick_ms = settings.tick_interval.as_millis() as u64,
            "EngineWorker initialized"
        );

        let mut worker = Self {
            machine,
            context: None,
            catalog,
            config,
            settings,
            command_rx,
            event_bus,
            working,
        };
        if let Some(session) = session {
            worker.context = Some(worker.new_context(session));
        }
        worker
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.settings.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => {
                        if self.handle_command(cmd, &mut ticker).await.is_break() {
                            break;
                        }
                    }
                    None => {
                        self.halt(EngineEvent::Stopped).await;
                        break;
                    }
                },
                _ = ticker.tick(), if self.is_working() => self.tick().await,
            }
        }

        info!(target: "farm::engine", "EngineWorker finished");
    }

    fn is_working(&self) -> bool {
        self.working.load(Ordering::Acquire)
    }

    fn set_working(&self, working: bool) {
        self.working.store(working, Ordering::Release);
    }

    fn new_context(&self, session: Arc<dyn GameSession>) -> FarmContext {
        let executor = Executor::new(
            Arc::clone(&self.catalog),
            self.event_bus.clone(),
            self.settings.after_cast_delay,
        );
        FarmContext::new(session, executor, self.config.snapshot(), self.event_bus.clone())
    }

    async fn handle_command(&mut self, cmd: Command, ticker: &mut Interval) -> ControlFlow<()> {
        match cmd {
            Command::Start { reply } => {
                let result = self.start(ticker);
                if reply.send(result).is_err() {
                    debug!(target: "farm::engine", "Start reply channel closed (caller dropped)");
                }
            }
            Command::Stop { reply } => {
                let result = self.stop().await;
                if reply.send(result).is_err() {
                    debug!(target: "farm::engine", "Stop reply channel closed (caller dropped)");
                }
            }
            Command::Attach { session, reply } => {
                self.attach(session).await;
                if reply.send(()).is_err() {
                    debug!(target: "farm::engine", "Attach reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown { reply } => {
                self.halt(EngineEvent::Stopped).await;
                if reply.send(()).is_err() {
                    debug!(target: "farm::engine", "Shutdown reply channel closed (caller dropped)");
                }
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn start(&mut self, ticker: &mut Interval) -> Result<()> {
        if self.is_working() {
            return Ok(());
        }
        if self.context.is_none() {
            warn!(target: "farm::engine", "start requested without a session");
            self.publish(Event::status("No session attached"));
            return Err(EngineError::NoSession);
        }

        self.set_working(true);
        ticker.reset_immediately();
        info!(target: "farm::engine", "engine started");
        self.publish(Event::Engine(EngineEvent::Started));
        self.publish(Event::status("Program running."));
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        if !self.is_working() {
            return Ok(());
        }

        self.set_working(false);
        let exited = self.exit_active().await;
        info!(target: "farm::engine", "engine stopped");
        self.publish(Event::Engine(EngineEvent::Stopped));
        self.publish(Event::status("Program paused."));
        exited.map_err(EngineError::from)
    }

    async fn attach(&mut self, session: Arc<dyn GameSession>) {
        // The active state exits against the session it entered with.
        if let Err(err) = self.exit_active().await {
            warn!(target: "farm::engine", error = %err, "exit during re-attach failed");
        }
        self.context = Some(self.new_context(session));
        info!(target: "farm::engine", "session attached");
        self.publish(Event::status("Session attached"));
    }

    /// Stops polling after the engine decided so itself. Best effort: the
    /// exit error is logged, not returned.
    async fn halt(&mut self, event: EngineEvent) {
        if !self.is_working() {
            return;
        }

        self.set_working(false);
        if let Err(err) = self.exit_active().await {
            warn!(target: "farm::engine", error = %err, "exit while halting failed");
        }
        self.publish(Event::Engine(event));
    }

    async fn exit_active(&mut self) -> std::result::Result<(), SessionError> {
        let Some(ctx) = self.context.as_mut() else {
            return Ok(());
        };
        let exited = self.machine.stop(ctx).await;
        // A halted engine holds no engagement; the next start re-evaluates.
        ctx.combat.reset();
        if let Some(state) = exited? {
            self.publish_state(StateEvent::Exited {
                state: state.to_string(),
            });
        }
        Ok(())
    }

    async fn tick(&mut self) {
        let Some(ctx) = self.context.as_mut() else {
            self.set_working(false);
            return;
        };

        let result = match ctx.session().heartbeat() {
            Ok(()) => {
                ctx.refresh(self.config.snapshot());
                self.machine.tick(ctx).await
            }
            Err(err) => Err(err),
        };
        let pause = ctx.take_pause();

        match result {
            Ok(step) => self.publish_step(step),
            Err(err) if err.is_fatal() => {
                error!(target: "farm::engine", error = %err, "session lost, stopping");
                self.publish(Event::status(format!("Session lost: {err}")));
                self.halt(EngineEvent::Faulted {
                    error: err.to_string(),
                })
                .await;
                return;
            }
            Err(err) => {
                debug!(target: "farm::engine", error = %err, "transient session error, re-evaluating next tick");
            }
        }

        if let Some(reason) = pause {
            info!(target: "farm::engine", %reason, "engine paused");
            self.halt(EngineEvent::Paused { reason }).await;
        }
    }

    fn publish_step(&self, step: Step) {
        if let Some(state) = step.exited {
            debug!(target: "farm::state", state, "exited");
            self.publish_state(StateEvent::Exited {
                state: state.to_string(),
            });
        }
        if let Some(state) = step.entered {
            info!(target: "farm::state", state, "entered");
            self.publish_state(StateEvent::Entered {
                state: state.to_string(),
            });
        }
    }

    fn publish_state(&self, event: StateEvent) {
        self.publish(Event::State(event));
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }
}
