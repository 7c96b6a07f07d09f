//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. CLI flags (`--directory-url`, `--task-url`, `--stream-url`, `--no-color`),
//!    applied by the binary after loading.
//! 2. Environment variables (`AGENTDESK_DIRECTORY_URL`, `AGENTDESK_TASK_URL`,
//!    `AGENTDESK_STREAM_URL`, `AGENTDESK_API_TIMEOUT_SECS`).
//! 3. TOML file specified via `--config`.
//! 4. `./agentdesk.toml` in the current directory.
//! 5. `$XDG_CONFIG_HOME/agentdesk/agentdesk.toml` (or `~/.config/...`).
//! 6. Built-in defaults.

mod defaults;
mod env;
mod init;
mod loader;
mod sources;
mod types;

pub use init::{config_root_dir, default_global_config_path, initialize_config};
pub use loader::{load_config, load_config_with_source, normalize_config};
pub use types::{
    ChatConfig, Config, ConfigInitResult, ConfigSource, DisplayConfig, EndpointsConfig,
    LoadedConfig, NetworkConfig,
};
