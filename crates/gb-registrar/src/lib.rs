//! # gb-registrar
//!
//! Best-effort delivery of enrollment notices to the external registrar.
//!
//! Request handlers hold a [`RegistrarHandle`] and call
//! [`RegistrarHandle::dispatch`] after their store transaction commits. The
//! call never blocks and never fails the caller: a full queue drops the
//! notice with a warning. A [`RegistrarWorker`] drains the queue in the
//! background and retries transient delivery failures with backoff.

mod error;
mod http;
pub mod retry;
pub mod transport;

pub use error::RegistrarError;
pub use retry::RetryConfig;
pub use transport::{HttpTransport, LogTransport, RegistrarTransport, Transport};

use gb_core::notice::RegistrarNotice;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What happened to a notice handed to [`RegistrarHandle::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    Queued,
    /// Queue full; the notice was dropped.
    Dropped,
    /// Worker gone; the notice was dropped.
    Closed,
}

impl Enqueued {
    #[must_use]
    pub const fn is_queued(self) -> bool {
        matches!(self, Self::Queued)
    }
}

/// Cloneable, non-blocking sender side of the notice queue.
#[derive(Debug, Clone)]
pub struct RegistrarHandle {
    tx: mpsc::Sender<RegistrarNotice>,
}

impl RegistrarHandle {
    /// A handle plus the raw receiving end. Tests read notices straight from
    /// the receiver; production wraps it in a [`RegistrarWorker`].
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<RegistrarNotice>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Queue `notice` without waiting.
    pub fn dispatch(&self, notice: RegistrarNotice) -> Enqueued {
        let enrollment_id = notice.payload.enrollment_id;
        match self.tx.try_send(notice) {
            Ok(()) => Enqueued::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    enrollment_id,
                    "registrar queue full, dropping notice"
                );
                Enqueued::Dropped
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!(enrollment_id, "registrar worker stopped, dropping notice");
                Enqueued::Closed
            }
        }
    }
}

/// Drains the notice queue and delivers each notice with retries.
pub struct RegistrarWorker<T> {
    rx: mpsc::Receiver<RegistrarNotice>,
    transport: T,
    retry: RetryConfig,
}

impl<T: RegistrarTransport> RegistrarWorker<T> {
    #[must_use]
    pub const fn new(rx: mpsc::Receiver<RegistrarNotice>, transport: T, retry: RetryConfig) -> Self {
        Self {
            rx,
            transport,
            retry,
        }
    }

    /// Create the queue and spawn its worker on the current runtime.
    ///
    /// The worker exits once every handle has been dropped and the queue is
    /// drained; await the returned `JoinHandle` to flush on shutdown.
    pub fn spawn(capacity: usize, transport: T, retry: RetryConfig) -> (RegistrarHandle, JoinHandle<()>) {
        let (handle, rx) = RegistrarHandle::channel(capacity);
        let worker = Self::new(rx, transport, retry);
        (handle, tokio::spawn(worker.run()))
    }

    pub async fn run(mut self) {
        tracing::debug!("registrar worker started");
        while let Some(notice) = self.rx.recv().await {
            self.deliver_with_retry(&notice).await;
        }
        tracing::debug!("registrar worker stopped");
    }

    /// Deliver one notice. Returns whether it was accepted.
    pub async fn deliver_with_retry(&self, notice: &RegistrarNotice) -> bool {
        let enrollment_id = notice.payload.enrollment_id;
        let max_attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.transport.deliver(notice).await {
                Ok(()) => {
                    tracing::debug!(enrollment_id, attempt, "registrar notice delivered");
                    return true;
                }
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = self.retry.delay_after(attempt, &e);
                    tracing::warn!(
                        enrollment_id,
                        attempt,
                        max_attempts,
                        ?delay,
                        error = %e,
                        "registrar delivery failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(
                        enrollment_id,
                        attempt,
                        error = %e,
                        "registrar notice abandoned"
                    );
                    return false;
                }
            }
        }
        false
    }
}
