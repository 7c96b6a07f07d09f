//! Agent directory endpoints.

use super::transport::{decode_json, join_url, read_success_body};
use crate::error::ApiError;
use crate::types::{Agent, AgentExecutionInfo, StartAgentRequest, StartAgentResponse};
use tracing::debug;

pub(super) async fn list_available_agents(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<Vec<Agent>, ApiError> {
    let url = join_url(base_url, "/available_agents");
    debug!(%url, "fetching available agents");
    let body = read_success_body(http.get(&url).send().await?).await?;
    decode_json(&body, "agent list")
}

pub(super) async fn execution_info(
    http: &reqwest::Client,
    base_url: &str,
) -> Result<AgentExecutionInfo, ApiError> {
    let url = join_url(base_url, "/agent_execution_info");
    debug!(%url, "fetching execution info");
    let body = read_success_body(http.get(&url).send().await?).await?;
    decode_json(&body, "execution info")
}

pub(super) async fn start_agent(
    http: &reqwest::Client,
    base_url: &str,
    agent_id: &str,
) -> Result<StartAgentResponse, ApiError> {
    let url = join_url(base_url, "/start_agent");
    debug!(%url, agent_id, "starting agent");
    let response = http
        .post(&url)
        .json(&StartAgentRequest {
            id: agent_id.to_string(),
        })
        .send()
        .await?;
    let status = response.status();
    let body = response.text().await?;

    // Rejections (400/500) still carry `{success, message}`; prefer that
    // over a bare status error when it decodes.
    match serde_json::from_str::<StartAgentResponse>(&body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(ApiError::status(status.as_u16(), body)),
        Err(err) => Err(ApiError::InvalidResponse(format!(
            "invalid start_agent payload: {err}"
        ))),
    }
}
