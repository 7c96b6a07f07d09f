//! `agentdesk start <agent-id>`.

use agentdesk::api::DirectoryApi;
use agentdesk::error::AppError;
use agentdesk::tui::Renderer;

/// Ask the directory service to start `agent_id`. Exit code mirrors the
/// service's `success` flag.
pub(crate) async fn run_start<D: DirectoryApi>(
    renderer: &Renderer,
    api: &D,
    agent_id: &str,
) -> Result<i32, AppError> {
    let response = {
        let _progress = renderer.progress("starting agent");
        api.start_agent(agent_id).await?
    };
    let message = start_message(agent_id, response.success, &response.message);
    if response.success {
        renderer.rows(&[message]);
        Ok(0)
    } else {
        renderer.error(&message);
        Ok(1)
    }
}

fn start_message(agent_id: &str, success: bool, message: &str) -> String {
    match (success, message.trim()) {
        (true, "") => format!("agent {agent_id} started"),
        (false, "") => format!("agent {agent_id} was not started"),
        (_, text) => text.to_string(),
    }
}
