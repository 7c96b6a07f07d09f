//! CLI entry point for agentdesk.

mod app;
mod cli;

use agentdesk::api::ApiClient;
use agentdesk::tui::Renderer;
use clap::Parser;
use cli::Command;
use tracing::info;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    app::startup::init_tracing();
    std::process::exit(run(args).await);
}

async fn run(args: cli::Args) -> i32 {
    let bootstrap_renderer = Renderer::new(!args.no_color);
    let command = args.command();

    // `init` must work even when the existing config is broken.
    if let Command::Init { force } = command {
        return match app::init::run_init(&bootstrap_renderer, args.config.as_deref(), force) {
            Ok(code) => code,
            Err(e) => {
                bootstrap_renderer.error(&e.to_string());
                1
            }
        };
    }

    let loaded = match app::startup::load_runtime_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            bootstrap_renderer.error(&e.to_string());
            return 1;
        }
    };
    let config = loaded.config;
    let renderer = Renderer::new(config.display.color);
    Renderer::set_progress_enabled(config.display.spinner);
    info!(
        source = %loaded.source.describe(),
        directory = %config.endpoints.directory_url,
        task = %config.endpoints.task_url,
        stream = %config.endpoints.stream_url,
        "starting"
    );

    let api = ApiClient::from_config(&config);
    let result = match command {
        Command::Dashboard => Ok(app::dashboard::run_dashboard(&renderer, &api).await),
        Command::Chat { message } => {
            app::chat::run_chat(&renderer, api, &config.chat, message).await
        }
        Command::Start { agent_id } => app::start::run_start(&renderer, &api, &agent_id).await,
        Command::Init { .. } => Ok(0),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            renderer.error(&e.to_string());
            1
        }
    }
}
