//! Client configuration structures and loaders.
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use farm_core::BattleLists;
use farm_runtime::EngineConfig;

/// Everything the `autofarm` binary reads from the environment.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub engine: EngineConfig,
    /// How long to farm before stopping. Runs until Ctrl-C when unset.
    pub run_for: Option<Duration>,
    pub log_dir: Option<PathBuf>,
    /// RON file with battle lists replacing the built-in ones.
    pub battle_lists: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUTOFARM_RUN_SECS` - Stop after this many seconds (default: until Ctrl-C)
    /// - `AUTOFARM_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `AUTOFARM_BATTLE_LISTS` - RON battle-list file (default: built-in lists)
    /// - plus everything [`EngineConfig::from_env`] reads
    pub fn from_env() -> Self {
        Self {
            engine: EngineConfig::from_env(),
            run_for: read_env::<u64>("AUTOFARM_RUN_SECS").map(Duration::from_secs),
            log_dir: env::var_os("AUTOFARM_LOG_DIR").map(PathBuf::from),
            battle_lists: env::var_os("AUTOFARM_BATTLE_LISTS").map(PathBuf::from),
        }
    }
}

/// Reads battle lists from a RON file.
pub fn load_battle_lists(path: &Path) -> Result<BattleLists> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read battle lists from {}", path.display()))?;
    parse_battle_lists(&text)
        .with_context(|| format!("invalid battle lists in {}", path.display()))
}

fn parse_battle_lists(text: &str) -> Result<BattleLists> {
    Ok(ron::from_str(text)?)
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
