//! HTTP transport helpers shared by the REST calls.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Build the REST client with a whole-request timeout.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Build the stream client: bounded connect, unbounded body.
pub(super) fn build_stream_client(connect_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Join a base URL and an absolute path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Read a response body, mapping non-2xx statuses to [`ApiError::Status`].
pub(super) async fn read_success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::status(status.as_u16(), body));
    }
    Ok(body)
}

/// Decode a JSON body, naming `what` in the error.
pub(super) fn decode_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::InvalidResponse(format!("invalid {what} payload: {err}")))
}
