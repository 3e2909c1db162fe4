//! Exponential backoff for notice delivery.

use std::time::Duration;

use crate::error::RegistrarError;

/// Retry behavior for a single notice.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff is capped here.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// Doubles from `base_delay`, capped at `max_delay`. A registrar
    /// `Retry-After` hint replaces the computed delay, still capped.
    #[must_use]
    pub fn delay_after(&self, attempt: u32, error: &RegistrarError) -> Duration {
        let backoff = self
            .base_delay
            .saturating_mul(1u32 << attempt.saturating_sub(1).min(16));
        let delay = match error {
            RegistrarError::RateLimited { retry_after_secs } => {
                Duration::from_secs(*retry_after_secs)
            }
            _ => backoff,
        };
        delay.min(self.max_delay)
    }
}
