//! `autofarm` binary.
//!
//! Composition root that assembles:
//! 1. Configuration from the environment (and `.env`)
//! 2. Logging (stderr plus a log file under the platform cache dir)
//! 3. The farming engine via `Engine::builder()`
//! 4. A simulated game session standing in for a real attachment
//!
//! # Examples
//!
//! ```bash
//! # Farm the demo world for a minute with verbose engine logs
//! AUTOFARM_RUN_SECS=60 RUST_LOG=farm=debug cargo run -p farm-client
//!
//! # Use custom battle lists
//! AUTOFARM_BATTLE_LISTS=crates/client/profiles/demo.ron cargo run -p farm-client
//! ```

mod config;
mod demo;
mod logging;

use std::sync::Arc;

use anyhow::Result;
use farm_core::SharedConfig;
use farm_runtime::{Engine, EngineEvent, Event, Topic};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    logging::setup_logging(config.log_dir.as_deref())?;
    info!("Starting autofarm");
    info!("Tick interval: {:?}", config.engine.tick_interval);

    // 3. Build the user configuration the host would normally persist
    let mut farm = demo::farm_config();
    if let Some(path) = &config.battle_lists {
        farm.battle_lists = config::load_battle_lists(path)?;
        info!("Battle lists loaded from {}", path.display());
    }

    // 4. Build the engine
    let engine = Engine::builder()
        .config(config.engine.clone())
        .catalog(Arc::new(demo::catalog()))
        .shared_config(SharedConfig::new(farm))
        .build()?;
    let handle = engine.handle();

    let reporters: Vec<_> = handle
        .subscribe_multiple(&[Topic::Engine, Topic::Status])
        .into_values()
        .map(|rx| tokio::spawn(report(rx)))
        .collect();

    // 5. Attach the simulated session and farm
    let session = Arc::new(demo::world());
    let world = tokio::spawn(demo::simulate(Arc::clone(&session)));
    handle.attach(session).await?;
    handle.start().await?;

    match config.run_for {
        Some(duration) => tokio::time::sleep(duration).await,
        None => tokio::signal::ctrl_c().await?,
    }

    if let Err(err) = handle.stop().await {
        warn!("Engine did not stop cleanly: {}", err);
    }
    world.abort();
    engine.shutdown().await?;
    for reporter in reporters {
        reporter.abort();
    }

    info!("autofarm finished");
    Ok(())
}

/// Logs the events of one topic until the engine ends.
async fn report(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Status(message)) => info!(target: "farm::status", "{}", message),
            Ok(Event::Engine(EngineEvent::Faulted { error })) => {
                warn!("Engine faulted: {}", error);
            }
            Ok(Event::Engine(EngineEvent::Paused { reason })) => {
                warn!("Engine paused: {}", reason);
            }
            Ok(event) => info!("{:?}", event),
            Err(RecvError::Lagged(missed)) => warn!("Missed {} events", missed),
            Err(RecvError::Closed) => break,
        }
    }
}
