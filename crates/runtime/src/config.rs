//! Engine configuration structures and loaders.
use std::env;
use std::time::Duration;

/// Shortest accepted poll period. Keeps the loop from spinning and bounds
/// how often the game is queried.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Engine configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Poll period of the state machine.
    pub tick_interval: Duration,
    /// Extra lock time after an ability's cast before the next action.
    pub after_cast_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            after_cast_delay: Duration::from_millis(500),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `AUTOFARM_TICK_MS` - Poll period in milliseconds (default: 100, min: 50)
    /// - `AUTOFARM_AFTER_CAST_MS` - Post-cast lock in milliseconds (default: 500)
    /// - `AUTOFARM_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `AUTOFARM_COMMAND_BUFFER` - Command queue size (default: 32)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("AUTOFARM_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(ms) = read_env::<u64>("AUTOFARM_AFTER_CAST_MS") {
            config.after_cast_delay = Duration::from_millis(ms);
        }

        if let Some(capacity) = read_env::<usize>("AUTOFARM_EVENT_BUFFER") {
            config.event_buffer_size = capacity;
        }

        if let Some(capacity) = read_env::<usize>("AUTOFARM_COMMAND_BUFFER") {
            config.command_buffer_size = capacity;
        }

        config.normalized()
    }

    /// Clamps values into their accepted ranges.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.tick_interval = self.tick_interval.max(MIN_TICK_INTERVAL);
        self.event_buffer_size = self.event_buffer_size.max(1);
        self.command_buffer_size = self.command_buffer_size.max(1);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_enforces_minimums() {
        let config = EngineConfig {
            tick_interval: Duration::from_millis(5),
            after_cast_delay: Duration::ZERO,
            event_buffer_size: 0,
            command_buffer_size: 0,
        }
        .normalized();

        assert_eq!(config.tick_interval, MIN_TICK_INTERVAL);
        assert_eq!(config.after_cast_delay, Duration::ZERO);
        assert_eq!(config.event_buffer_size, 1);
        assert_eq!(config.command_buffer_size, 1);
    }

    #[test]
    fn defaults_are_already_normal() {
        assert_eq!(EngineConfig::default().normalized(), EngineConfig::default());
    }
}
