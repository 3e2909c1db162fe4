//! Delivery backends for registrar notices.

use std::future::Future;
use std::time::Duration;

use gb_core::notice::RegistrarNotice;

use crate::error::RegistrarError;
use crate::http::check_response;

/// Something that can hand one notice to the registrar.
pub trait RegistrarTransport: Send + Sync + 'static {
    /// Deliver `notice` once. Retries are the worker's concern.
    fn deliver(
        &self,
        notice: &RegistrarNotice,
    ) -> impl Future<Output = Result<(), RegistrarError>> + Send;
}

/// POSTs each notice as JSON to `<base_url>/notices`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Returns `RegistrarError::Http` if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RegistrarError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gradebook/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/notices", base_url.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RegistrarTransport for HttpTransport {
    async fn deliver(&self, notice: &RegistrarNotice) -> Result<(), RegistrarError> {
        let resp = self.http.post(&self.endpoint).json(notice).send().await?;
        check_response(resp).await?;
        Ok(())
    }
}

/// Logs each notice instead of sending it. Used when no registrar URL is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

impl RegistrarTransport for LogTransport {
    async fn deliver(&self, notice: &RegistrarNotice) -> Result<(), RegistrarError> {
        let body = serde_json::to_string(notice)?;
        tracing::info!(
            action = notice.action.as_str(),
            enrollment_id = notice.payload.enrollment_id,
            %body,
            "registrar notice (no registrar configured)"
        );
        Ok(())
    }
}

/// Transport picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum Transport {
    Http(HttpTransport),
    Log(LogTransport),
}

impl Transport {
    /// HTTP when `url` is non-empty, logging otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RegistrarError::Http` if the HTTP client cannot be built.
    pub fn from_url(url: &str, timeout: Duration) -> Result<Self, RegistrarError> {
        if url.is_empty() {
            Ok(Self::Log(LogTransport))
        } else {
            HttpTransport::new(url, timeout).map(Self::Http)
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Log(_) => "log",
        }
    }
}

impl RegistrarTransport for Transport {
    async fn deliver(&self, notice: &RegistrarNotice) -> Result<(), RegistrarError> {
        match self {
            Self::Http(t) => t.deliver(notice).await,
            Self::Log(t) => t.deliver(notice).await,
        }
    }
}
