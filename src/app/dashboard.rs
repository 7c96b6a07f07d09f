//! `agentdesk dashboard`.

use agentdesk::api::DirectoryApi;
use agentdesk::dashboard::{load_dashboard, DashboardState};
use agentdesk::tui::dashboard_view::render_dashboard;
use agentdesk::tui::{settings, Renderer};
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Load and print the dashboard. On failure, offer a manual retry when
/// stdin is a terminal. Returns the process exit code.
pub(crate) async fn run_dashboard<D: DirectoryApi>(renderer: &Renderer, api: &D) -> i32 {
    let interactive = std::io::stdin().is_terminal();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let state = {
            let _progress = renderer.progress(settings::LABEL_LOADING_DASHBOARD);
            load_dashboard(api).await
        };
        match state {
            DashboardState::Failed(message) => {
                renderer.error(&message);
                if !interactive {
                    return 1;
                }
                renderer.retry_prompt();
                match stdin.next_line().await {
                    Ok(Some(answer)) if wants_retry(&answer) => continue,
                    _ => return 1,
                }
            }
            state => {
                renderer.rows(&render_dashboard(&state, renderer.color()));
                return 0;
            }
        }
    }
}

fn wants_retry(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "" | "y" | "yes" | "r" | "retry"
    )
}
