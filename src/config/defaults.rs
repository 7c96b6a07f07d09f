//! Default configuration constants.
//!
//! Shared by the typed defaults and the loader so literals live in one place.

/// Embedded default `agentdesk.toml` template written by `agentdesk init`.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/agentdesk.toml");
/// Config file name used for both local and global lookup.
pub(super) const CONFIG_FILE_NAME: &str = "agentdesk.toml";
/// Directory under the config root that holds the global config file.
pub(super) const CONFIG_DIR_NAME: &str = "agentdesk";
/// Agent directory service base URL.
pub(super) const DEFAULT_DIRECTORY_URL: &str = "http://localhost:5000";
/// Task submission endpoint.
pub(super) const DEFAULT_TASK_URL: &str = "http://localhost:8000/run_agent";
/// Base URL of the gateway serving `/stream/{taskId}`.
pub(super) const DEFAULT_STREAM_URL: &str = "http://localhost:8000";
/// Timeout for REST requests.
pub(super) const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
/// Connect timeout for the event stream.
pub(super) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Display name announced when a task joins the chat.
pub(super) const DEFAULT_AGENT_NAME: &str = "Data Intelligence Agent";
/// Synthetic first message of every chat session.
pub(super) const DEFAULT_GREETING: &str =
    "Hello! Let me know what you need and I will connect you with the right agent.";
