//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, glyphs, colors,
//! indentation, and spinner behavior.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_1: &str = "  ";
pub const INDENT_2: &str = "    ";
pub const BLOCK_FALLBACK_COLUMNS: usize = 100;
pub const BLOCK_RIGHT_MARGIN: usize = 2;
/// Share of the content width a human bubble may use.
pub const HUMAN_BUBBLE_MAX_PERCENT: usize = 60;
/// Share of the content width a custom-event bubble may use.
pub const EVENT_BUBBLE_MAX_PERCENT: usize = 70;
pub const DESCRIPTION_PREVIEW_CHARS: usize = 120;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_SYMBOL: &str = ">";
pub const PROMPT_PLAIN: &str = "> ";
pub const PROMPT_RETRY: &str = "retry? [y/n] ";
pub const CHAT_QUIT_COMMAND: &str = "/quit";
pub const CHAT_HINT: &str = "Type your message, /quit to leave.";

// ---------------------------------------------------------------------------
// Sections / labels
// ---------------------------------------------------------------------------

pub const LABEL_APP: &str = "agentdesk";
pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

pub const TITLE_DASHBOARD: &str = "Agent Dashboard";
pub const TITLE_AVAILABLE: &str = "Available Agents";
pub const TITLE_RUNNING: &str = "Running Agents";
pub const TITLE_COMPLETED: &str = "Recently Completed";
pub const EMPTY_AVAILABLE: &str = "No agents available";
pub const EMPTY_RUNNING: &str = "No agents running";
pub const EMPTY_COMPLETED: &str = "No recently completed agents";
pub const LABEL_LOADING_DASHBOARD: &str = "loading agents";
pub const LABEL_SUBMITTING: &str = "submitting task";

pub const GLYPH_SECTION_BULLET: &str = "•";
pub const GLYPH_BOT: &str = "◆";
pub const GLYPH_BOT_PLAIN: &str = "*";
pub const GLYPH_HUMAN: &str = "◇";
pub const GLYPH_HUMAN_PLAIN: &str = "<";

// ---------------------------------------------------------------------------
// Spinner / progress
// ---------------------------------------------------------------------------

pub const PROGRESS_CLEAR_LINE: &str = "\r\x1b[2K";
pub const PROGRESS_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const PROGRESS_TICK_MS: u64 = 100;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_SYMBOL: Color = Color::Green;
pub const COLOR_APP_LABEL: Color = Color::Green;
pub const COLOR_META: Color = Color::DarkGrey;

pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::Cyan;
pub const COLOR_FIELD_KEY: Color = Color::DarkGrey;
pub const COLOR_FIELD_VALUE: Color = Color::White;
pub const COLOR_AGENT_NAME: Color = Color::White;
pub const COLOR_PLACEHOLDER: Color = Color::DarkGrey;
pub const COLOR_COUNT: Color = Color::Cyan;

pub const COLOR_STATUS_RUNNING: Color = Color::Yellow;
pub const COLOR_STATUS_COMPLETED: Color = Color::Green;
pub const COLOR_STATUS_FAILED: Color = Color::Red;
pub const COLOR_STATUS_OTHER: Color = Color::DarkGrey;

pub const COLOR_PROGRESS_FRAME: Color = Color::Cyan;
pub const COLOR_PROGRESS_LABEL: Color = Color::DarkGrey;
pub const COLOR_PROGRESS_ELAPSED: Color = Color::DarkGrey;

pub const COLOR_SYSTEM_TEXT: Color = Color::DarkGrey;
pub const COLOR_HUMAN_TEXT: Color = Color::White;
pub const COLOR_HUMAN_BG: Color = Color::Rgb {
    r: 38,
    g: 38,
    b: 38,
};
pub const COLOR_HUMAN_GLYPH: Color = Color::Grey;
pub const COLOR_GLYPH_GREETING: Color = Color::Blue;
pub const COLOR_GLYPH_AGENT: Color = Color::Green;
pub const COLOR_GLYPH_INACTIVE: Color = Color::DarkGrey;
pub const COLOR_AGENT_TEXT: Color = Color::Rgb {
    r: 229,
    g: 229,
    b: 229,
};
pub const COLOR_PLAIN_BUBBLE_BG: Color = Color::Rgb {
    r: 75,
    g: 85,
    b: 99,
};
pub const COLOR_EVENT_TEXT: Color = Color::White;
pub const COLOR_EVENT_TEXT_INACTIVE: Color = Color::Grey;

// ---------------------------------------------------------------------------
// Event bubble palette
// ---------------------------------------------------------------------------

pub const EVENT_SATURATION: f64 = 0.70;
pub const EVENT_LIGHTNESS: f64 = 0.50;
/// Opacity of an inactive event bubble over the terminal background.
pub const EVENT_INACTIVE_ALPHA: f64 = 0.3;
/// Assumed terminal background used for fading inactive bubbles.
pub const RGB_TERMINAL_BG: (u8, u8, u8) = (26, 26, 26);

// ---------------------------------------------------------------------------
// Small helpers
// ---------------------------------------------------------------------------

pub fn bot_glyph(color: bool) -> &'static str {
    if color {
        GLYPH_BOT
    } else {
        GLYPH_BOT_PLAIN
    }
}

pub fn human_glyph(color: bool) -> &'static str {
    if color {
        GLYPH_HUMAN
    } else {
        GLYPH_HUMAN_PLAIN
    }
}
