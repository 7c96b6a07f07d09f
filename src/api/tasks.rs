//! Task submission endpoint.

use super::transport::{decode_json, read_success_body};
use crate::error::ApiError;
use crate::types::TaskRequest;
use serde_json::Value;
use tracing::debug;

/// POST `{taskId, message}`; any JSON 2xx body counts as accepted.
pub(super) async fn submit_task(
    http: &reqwest::Client,
    task_url: &str,
    request: &TaskRequest,
) -> Result<(), ApiError> {
    let response = http.post(task_url).json(request).send().await?;
    let body = read_success_body(response).await?;
    let accepted: Value = decode_json(&body, "task submission")?;
    debug!(task_id = %request.task_id, %accepted, "agent accepted task");
    Ok(())
}
