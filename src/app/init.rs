//! `agentdesk init`.

use agentdesk::config::{initialize_config, ConfigInitResult};
use agentdesk::error::AppError;
use agentdesk::tui::Renderer;

/// Write the default config template to `path_override` or the per-user
/// location.
pub(crate) fn run_init(
    renderer: &Renderer,
    path_override: Option<&str>,
    force: bool,
) -> Result<i32, AppError> {
    let result = initialize_config(path_override, force)?;
    report(renderer, &result);
    Ok(0)
}

fn report(renderer: &Renderer, result: &ConfigInitResult) {
    match result {
        ConfigInitResult::Created { path } => {
            renderer.field("created", &path.display().to_string());
        }
        ConfigInitResult::AlreadyInitialized { path } => {
            renderer.field("exists", &path.display().to_string());
            renderer.hint("Pass --force to overwrite it (a backup is kept).");
        }
        ConfigInitResult::Overwritten { path, backup_path } => {
            renderer.field("overwritten", &path.display().to_string());
            renderer.field("backup", &backup_path.display().to_string());
        }
    }
}
