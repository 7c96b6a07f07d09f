//! Compile-time build metadata exposed to CLI surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("AGENTDESK_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("AGENTDESK_BUILD_TIMESTAMP");

/// Version block used by `agentdesk --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("AGENTDESK_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("AGENTDESK_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `agentdesk --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("AGENTDESK_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("AGENTDESK_BUILD_TIMESTAMP")
);

/// One-line metadata shown in the chat banner.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
