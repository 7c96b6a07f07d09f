//! Dashboard page rendering.

use crate::dashboard::{DashboardState, DirectorySnapshot};
use crate::tui::settings;
use crate::tui::text::truncate_single_line;
use crate::types::{format_local_time, Agent, AgentStatus};
use crossterm::style::{Color, Stylize};

/// Rows for the whole page in its current state.
pub fn render_dashboard(state: &DashboardState, color: bool) -> Vec<String> {
    match state {
        DashboardState::Loading => vec![paint(
            &format!("{}...", settings::LABEL_LOADING_DASHBOARD),
            color,
            settings::COLOR_META,
        )],
        DashboardState::Failed(message) => render_error_page(message, color),
        DashboardState::Loaded(snapshot) => render_snapshot(snapshot, color),
    }
}

fn render_error_page(message: &str, color: bool) -> Vec<String> {
    let label = if color {
        settings::LABEL_ERROR
            .with(settings::COLOR_ERROR)
            .bold()
            .to_string()
    } else {
        settings::LABEL_ERROR.to_string()
    };
    vec![format!("{label} {message}")]
}

fn render_snapshot(snapshot: &DirectorySnapshot, color: bool) -> Vec<String> {
    let mut rows = Vec::new();
    let title = if color {
        settings::TITLE_DASHBOARD
            .with(settings::COLOR_APP_LABEL)
            .bold()
            .to_string()
    } else {
        settings::TITLE_DASHBOARD.to_string()
    };
    rows.push(title);
    rows.push(summary_row(snapshot, color));

    rows.push(String::new());
    rows.push(section_title(settings::TITLE_AVAILABLE, color));
    if snapshot.available.is_empty() {
        rows.push(placeholder(settings::EMPTY_AVAILABLE, color));
    }
    for agent in &snapshot.available {
        rows.push(agent_name_row(agent, color));
        rows.push(field_row("ID", &agent.id, color));
        if let Some(description) = agent.description.as_deref().filter(|d| !d.trim().is_empty()) {
            rows.push(detail_row(
                &truncate_single_line(description, settings::DESCRIPTION_PREVIEW_CHARS),
                color,
            ));
        }
    }

    rows.push(String::new());
    rows.push(section_title(settings::TITLE_RUNNING, color));
    if snapshot.execution.currently_running.is_empty() {
        rows.push(placeholder(settings::EMPTY_RUNNING, color));
    }
    for agent in &snapshot.execution.currently_running {
        rows.push(agent_name_row(agent, color));
        rows.push(field_row("Started", &time_or_unknown(agent.start_time.as_deref()), color));
    }

    rows.push(String::new());
    rows.push(section_title(settings::TITLE_COMPLETED, color));
    if snapshot.execution.recently_completed.is_empty() {
        rows.push(placeholder(settings::EMPTY_COMPLETED, color));
    }
    for agent in &snapshot.execution.recently_completed {
        rows.push(agent_name_row(agent, color));
        rows.push(field_row("Finished", &time_or_unknown(agent.end_time.as_deref()), color));
    }
    rows
}

fn summary_row(snapshot: &DirectorySnapshot, color: bool) -> String {
    let counts = [
        ("available", snapshot.available_count()),
        ("running", snapshot.running_count()),
        ("completed", snapshot.completed_count()),
    ];
    counts
        .iter()
        .map(|&(label, count)| {
            if color {
                format!(
                    "{} {}",
                    count.to_string().with(settings::COLOR_COUNT).bold(),
                    label.with(settings::COLOR_META)
                )
            } else {
                format!("{count} {label}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn section_title(title: &str, color: bool) -> String {
    if color {
        format!(
            "{} {}",
            settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
            title.with(settings::COLOR_SECTION_TITLE).bold()
        )
    } else {
        format!("{title}:")
    }
}

fn agent_name_row(agent: &Agent, color: bool) -> String {
    let status = agent.status;
    let show_status = status != AgentStatus::Idle;
    if color {
        let name = agent.name.as_str().with(settings::COLOR_AGENT_NAME).bold();
        if show_status {
            format!(
                "{}{name} {}",
                settings::INDENT_1,
                format!("[{}]", status.label()).with(status_color(status))
            )
        } else {
            format!("{}{name}", settings::INDENT_1)
        }
    } else if show_status {
        format!("{}{} [{}]", settings::INDENT_1, agent.name, status.label())
    } else {
        format!("{}{}", settings::INDENT_1, agent.name)
    }
}

fn field_row(key: &str, value: &str, color: bool) -> String {
    if color {
        format!(
            "{}{} {}",
            settings::INDENT_2,
            format!("{key}:").with(settings::COLOR_FIELD_KEY),
            value.with(settings::COLOR_FIELD_VALUE)
        )
    } else {
        format!("{}{key}: {value}", settings::INDENT_2)
    }
}

fn detail_row(text: &str, color: bool) -> String {
    format!("{}{}", settings::INDENT_2, paint(text, color, settings::COLOR_META))
}

fn placeholder(text: &str, color: bool) -> String {
    format!(
        "{}{}",
        settings::INDENT_1,
        paint(text, color, settings::COLOR_PLACEHOLDER)
    )
}

fn time_or_unknown(raw: Option<&str>) -> String {
    match raw {
        Some(raw) if !raw.trim().is_empty() => format_local_time(raw),
        _ => "unknown".to_string(),
    }
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Running => settings::COLOR_STATUS_RUNNING,
        AgentStatus::Completed => settings::COLOR_STATUS_COMPLETED,
        AgentStatus::Failed => settings::COLOR_STATUS_FAILED,
        AgentStatus::Idle | AgentStatus::Unknown => settings::COLOR_STATUS_OTHER,
    }
}

fn paint(text: &str, color: bool, fg: Color) -> String {
    if color {
        text.with(fg).to_string()
    } else {
        text.to_string()
    }
}
