//! Terminal output for the CLI commands.
//!
//! Page content (dashboard rows, chat bubbles) goes to stdout; prompts,
//! status lines and spinners go to stderr so piping stdout stays clean.

use crate::tui::chat_view::ChatStyle;
use crate::tui::progress::{set_progress_enabled, start_progress, ProgressHandle};
use crate::tui::settings;
use crossterm::style::Stylize;
use crossterm::terminal;
use std::io::{self, Write};

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Globally enable/disable live progress spinners.
    pub fn set_progress_enabled(enabled: bool) {
        set_progress_enabled(enabled);
    }

    /// Chat layout sized to the current terminal.
    pub fn chat_style(&self) -> ChatStyle {
        ChatStyle::new(self.color, content_width())
    }

    /// Print the input prompt indicator (to stderr).
    pub fn prompt(&self) {
        if self.color {
            eprint!(
                "{} ",
                settings::PROMPT_SYMBOL
                    .with(settings::COLOR_PROMPT_SYMBOL)
                    .bold()
            );
        } else {
            eprint!("{}", settings::PROMPT_PLAIN);
        }
        let _ = io::stderr().flush();
    }

    /// Ask whether to retry a failed load (to stderr).
    pub fn retry_prompt(&self) {
        if self.color {
            eprint!("{}", settings::PROMPT_RETRY.with(settings::COLOR_WARNING));
        } else {
            eprint!("{}", settings::PROMPT_RETRY);
        }
        let _ = io::stderr().flush();
    }

    /// Start a spinner with a status label on stderr.
    pub fn progress(&self, label: &str) -> ProgressHandle {
        start_progress(label, self.color)
    }

    /// Print the session header (to stderr).
    pub fn header(&self, subtitle: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                settings::LABEL_APP.with(settings::COLOR_APP_LABEL).bold(),
                subtitle.with(settings::COLOR_META),
            );
        } else {
            eprintln!("{} ({subtitle})", settings::LABEL_APP);
        }
    }

    /// Print a muted hint line (to stderr).
    pub fn hint(&self, text: &str) {
        if self.color {
            eprintln!("{}", text.with(settings::COLOR_META));
        } else {
            eprintln!("{text}");
        }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_ERROR);
        }
    }

    /// Print a key/value line (to stderr).
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::COLOR_FIELD_KEY),
                value.with(settings::COLOR_FIELD_VALUE),
            );
        } else {
            eprintln!("{}{key}: {value}", settings::INDENT_1);
        }
    }

    /// Write page rows to stdout.
    pub fn rows(&self, rows: &[String]) {
        let mut out = io::stdout().lock();
        for row in rows {
            let _ = writeln!(out, "{row}");
        }
        let _ = out.flush();
    }

    /// Write raw text to stdout without a trailing newline.
    pub fn raw(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut out = io::stdout().lock();
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }
}

/// Usable columns after the outer indent and right margin.
pub fn content_width() -> usize {
    let cols = terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(settings::BLOCK_FALLBACK_COLUMNS);
    let indent = settings::INDENT_1.chars().count();
    cols.saturating_sub(indent + settings::BLOCK_RIGHT_MARGIN)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_width_is_positive() {
        assert!(content_width() >= 1);
    }

    #[test]
    fn chat_style_follows_color_flag() {
        assert!(!Renderer::new(false).chat_style().color);
        assert!(Renderer::new(true).chat_style().color);
    }
}
