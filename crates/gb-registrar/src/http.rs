//! Response status handling for the registrar endpoint.

use crate::error::RegistrarError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`RegistrarError::RateLimited`] with
///   `Retry-After` parsing (falls back to 1 s if absent or unparseable).
/// - **Non-success status** → [`RegistrarError::Api`] with status code and
///   response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RegistrarError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(RegistrarError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(RegistrarError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}
