use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use gb_config::GradebookConfig;
use gb_db::GradebookService;
use gb_registrar::{RegistrarWorker, RetryConfig, Transport};
use tokio::task::JoinHandle;

/// How long shutdown waits for queued notices to drain.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: Arc<GradebookService>,
    pub config: GradebookConfig,
    registrar_worker: JoinHandle<()>,
}

impl AppContext {
    /// Open the store and start the registrar worker.
    pub async fn init(config: GradebookConfig) -> anyhow::Result<Self> {
        let transport = Transport::from_url(&config.registrar.url, config.registrar.timeout())
            .context("failed to build registrar transport")?;
        let retry = RetryConfig {
            max_attempts: config.registrar.max_attempts,
            base_delay: config.registrar.base_delay(),
            max_delay: config.registrar.max_delay(),
        };
        tracing::debug!(
            transport = transport.name(),
            capacity = config.registrar.queue_capacity,
            "starting registrar worker"
        );
        let (registrar, registrar_worker) =
            RegistrarWorker::spawn(config.registrar.queue_capacity, transport, retry);

        let service = GradebookService::new_local(&config.database.path, registrar)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        Ok(Self {
            service: Arc::new(service),
            config,
            registrar_worker,
        })
    }

    /// Close the notice queue and wait for the worker to finish delivering.
    ///
    /// Every other clone of the service must already be dropped, or the
    /// queue stays open until the drain timeout.
    pub async fn shutdown(self) {
        drop(self.service);
        match tokio::time::timeout(DRAIN_TIMEOUT, self.registrar_worker).await {
            Ok(Ok(())) => tracing::debug!("registrar worker drained"),
            Ok(Err(error)) => tracing::warn!(%error, "registrar worker panicked"),
            Err(_) => tracing::warn!(
                timeout_secs = DRAIN_TIMEOUT.as_secs(),
                "registrar worker did not drain in time; pending notices dropped"
            ),
        }
    }
}
