//! Registrar notifier settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_queue_capacity() -> usize {
    256
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_base_delay_ms() -> u64 {
    200
}

const fn default_max_delay_ms() -> u64 {
    5_000
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrarConfig {
    /// Base URL of the registrar service. Empty = log notices instead of
    /// sending them.
    #[serde(default)]
    pub url: String,

    /// Bounded queue between request handlers and the delivery worker.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Delivery attempts per notice, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            queue_capacity: default_queue_capacity(),
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RegistrarConfig {
    /// Whether notices go to a real registrar over HTTP.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    #[must_use]
    pub const fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RegistrarConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.queue_capacity, 256);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.base_delay(), Duration::from_millis(200));
        assert_eq!(config.max_delay(), Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }
}
