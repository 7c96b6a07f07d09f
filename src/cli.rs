//! CLI argument parsing via clap.

use agentdesk::build_info;
use clap::{Parser, Subcommand};

/// Terminal dashboard and chat client for an agent backend.
#[derive(Debug, Parser)]
#[command(
    name = "agentdesk",
    version,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./agentdesk.toml or ~/.config/agentdesk/agentdesk.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the agent directory service URL.
    #[arg(long = "directory-url", global = true)]
    pub directory_url: Option<String>,

    /// Override the task submission endpoint.
    #[arg(long = "task-url", global = true)]
    pub task_url: Option<String>,

    /// Override the event stream base URL.
    #[arg(long = "stream-url", global = true)]
    pub stream_url: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show available, running and recently completed agents (default).
    Dashboard,
    /// Chat with the agent pipeline.
    Chat {
        /// Send one message, stream the reply and exit.
        #[arg(short = 'm', long = "message")]
        message: Option<String>,
    },
    /// Start an agent by id.
    Start {
        /// Agent id as listed on the dashboard.
        agent_id: String,
    },
    /// Write the default config file.
    Init {
        /// Overwrite an existing config after backing it up.
        #[arg(long = "force")]
        force: bool,
    },
}

impl Args {
    /// The subcommand to run; bare `agentdesk` shows the dashboard.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dashboard)
    }
}
