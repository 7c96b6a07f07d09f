//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Loading and precedence logic
//! stays in `config::loader`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_AGENT_NAME, DEFAULT_API_TIMEOUT_SECS, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_DIRECTORY_URL, DEFAULT_GREETING, DEFAULT_STREAM_URL, DEFAULT_TASK_URL,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointsConfig,
    pub network: NetworkConfig,
    pub chat: ChatConfig,
    pub display: DisplayConfig,
}

/// Backend endpoint locations.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Base URL of the agent directory service.
    pub directory_url: String,
    /// Full URL of the task submission endpoint.
    pub task_url: String,
    /// Base URL of the gateway serving `/stream/{taskId}`.
    pub stream_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            task_url: DEFAULT_TASK_URL.to_string(),
            stream_url: DEFAULT_STREAM_URL.to_string(),
        }
    }
}

/// Network/HTTP timeout policy.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    /// Timeout for REST requests (directory and task submission).
    pub api_timeout_secs: u64,
    /// Connect timeout for the event stream. The stream itself has no
    /// request timeout since it stays open for the whole task.
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Chat session settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChatConfig {
    /// Name used in the "has entered the chat" announcement.
    pub agent_name: String,
    /// Content of the synthetic greeting message.
    pub greeting: String,
    /// Close a silent stream after this many seconds. `None` waits forever.
    pub stream_idle_timeout_secs: Option<u64>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            stream_idle_timeout_secs: None,
        }
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
    /// Show a spinner while requests are in flight.
    pub spinner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            spinner: true,
        }
    }
}

/// Where the effective config text was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path.
    Explicit(PathBuf),
    /// `./agentdesk.toml` in the working directory.
    Local,
    /// Per-user config under the config root.
    Global(PathBuf),
    /// No file found; built-in defaults were used.
    BuiltInDefaults,
}

impl ConfigSource {
    /// Short label for log lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(path) | Self::Global(path) => path.display().to_string(),
            Self::Local => "./agentdesk.toml".to_string(),
            Self::BuiltInDefaults => "built-in defaults".to_string(),
        }
    }
}

/// Configuration plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Result of explicit config initialization (`agentdesk init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
