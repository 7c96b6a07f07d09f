//! Chat transcript rendering.
//!
//! [`render_message`] turns one message into terminal rows. [`ChatPrinter`]
//! diffs successive snapshots so a line-oriented terminal prints each
//! settled bubble once and streams the growing answer at the tail.

use crate::chat::{Bubble, ChatSnapshot, Message};
use crate::tui::markdown::render_markdown_lines;
use crate::tui::palette::event_background;
use crate::tui::settings;
use crate::tui::text::{pad_to_width, visible_width, wrap_text};
use crossterm::style::{Color, Stylize};

/// Columns taken by the bot glyph and its trailing space.
const GLYPH_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatStyle {
    pub color: bool,
    /// Usable columns after the outer indent.
    pub width: usize,
}

impl ChatStyle {
    pub fn new(color: bool, width: usize) -> Self {
        Self {
            color,
            width: width.max(GLYPH_COLUMNS + 8),
        }
    }

    fn body_width(self) -> usize {
        self.width - GLYPH_COLUMNS
    }

    fn percent_of_body(self, percent: usize) -> usize {
        (self.body_width() * percent / 100).max(8)
    }
}

/// Render every message in order.
pub fn render_transcript(messages: &[Message], style: ChatStyle) -> Vec<String> {
    messages
        .iter()
        .flat_map(|message| render_message(message, style))
        .collect()
}

/// Rows for one message, each prefixed with the outer indent.
pub fn render_message(message: &Message, style: ChatStyle) -> Vec<String> {
    let rows = match message.bubble() {
        Bubble::System => render_system(message, style),
        Bubble::Human => render_human(message, style),
        Bubble::Greeting | Bubble::Stream => {
            let body = render_markdown_lines(&message.content, style.body_width());
            let body = body
                .into_iter()
                .map(|row| paint(&row, style, settings::COLOR_AGENT_TEXT, None))
                .collect();
            with_bot_glyph(message, body, style)
        }
        Bubble::Plain => {
            let body = render_markdown_lines(&message.content, style.body_width() - 2);
            let body = filled_bubble(&body, style, Color::White, settings::COLOR_PLAIN_BUBBLE_BG);
            with_bot_glyph(message, body, style)
        }
        Bubble::Event => with_bot_glyph(message, render_event(message, style), style),
    };
    rows.into_iter()
        .map(|row| format!("{}{row}", settings::INDENT_1))
        .collect()
}

fn render_system(message: &Message, style: ChatStyle) -> Vec<String> {
    wrap_text(&message.content, style.width)
        .iter()
        .map(|row| paint(row, style, settings::COLOR_SYSTEM_TEXT, None))
        .collect()
}

fn render_human(message: &Message, style: ChatStyle) -> Vec<String> {
    let inner = style.percent_of_body(settings::HUMAN_BUBBLE_MAX_PERCENT);
    let rows = wrap_text(&message.content, inner);
    let bubble_width = rows.iter().map(|row| visible_width(row)).max().unwrap_or(0) + 2;
    let glyph = settings::human_glyph(style.color);
    let last = rows.len().saturating_sub(1);
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let cell = format!(" {} ", pad_to_width(row, bubble_width - 2));
            let cell = paint(
                &cell,
                style,
                settings::COLOR_HUMAN_TEXT,
                Some(settings::COLOR_HUMAN_BG),
            );
            let suffix = if idx == last {
                format!(" {}", paint(glyph, style, settings::COLOR_HUMAN_GLYPH, None))
            } else {
                "  ".to_string()
            };
            // Alignment is computed on the unstyled width.
            let pad = style.width.saturating_sub(bubble_width + GLYPH_COLUMNS);
            format!("{}{cell}{suffix}", " ".repeat(pad))
        })
        .collect()
}

fn render_event(message: &Message, style: ChatStyle) -> Vec<String> {
    let event_type = message.event_type().unwrap_or_default();
    let inner = style.percent_of_body(settings::EVENT_BUBBLE_MAX_PERCENT);
    if !style.color {
        let text = format!("[{event_type}] {}", message.content);
        return wrap_text(text.trim_end(), inner);
    }
    let rows = wrap_text(&message.content, inner);
    let fg = if message.active {
        settings::COLOR_EVENT_TEXT
    } else {
        settings::COLOR_EVENT_TEXT_INACTIVE
    };
    filled_bubble(&rows, style, fg, event_background(event_type, message.active))
}

/// Pad rows to a common width and paint them on `bg` with one column of
/// padding each side.
fn filled_bubble(rows: &[String], style: ChatStyle, fg: Color, bg: Color) -> Vec<String> {
    let rows: Vec<&str> = if rows.is_empty() {
        vec![""]
    } else {
        rows.iter().map(String::as_str).collect()
    };
    let width = rows.iter().map(|row| visible_width(row)).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let cell = format!(" {} ", pad_to_width(row, width));
            paint(&cell, style, fg, Some(bg))
        })
        .collect()
}

fn with_bot_glyph(message: &Message, body: Vec<String>, style: ChatStyle) -> Vec<String> {
    let glyph = bot_glyph(message, style);
    let mut rows = Vec::with_capacity(body.len().max(1));
    let mut body = body.into_iter();
    rows.push(format!("{glyph} {}", body.next().unwrap_or_default()));
    rows.extend(body.map(|row| format!("{}{row}", " ".repeat(GLYPH_COLUMNS))));
    rows
}

fn bot_glyph(message: &Message, style: ChatStyle) -> String {
    let color = if !message.active {
        settings::COLOR_GLYPH_INACTIVE
    } else if message.bubble() == Bubble::Greeting {
        settings::COLOR_GLYPH_GREETING
    } else {
        settings::COLOR_GLYPH_AGENT
    };
    paint(settings::bot_glyph(style.color), style, color, None)
}

fn paint(text: &str, style: ChatStyle, fg: Color, bg: Option<Color>) -> String {
    if !style.color {
        return text.to_string();
    }
    match bg {
        Some(bg) => text.with(fg).on(bg).to_string(),
        None => text.with(fg).to_string(),
    }
}

/// Incremental printer for a live session.
#[derive(Debug, Clone)]
pub struct ChatPrinter {
    style: ChatStyle,
    /// Messages fully written.
    printed: usize,
    /// Tail message being streamed: its index and how many chars are out.
    streaming: Option<(usize, usize)>,
}

impl ChatPrinter {
    pub fn new(style: ChatStyle) -> Self {
        Self {
            style,
            printed: 0,
            streaming: None,
        }
    }

    /// Text to write so the terminal catches up with `snapshot`.
    pub fn update(&mut self, snapshot: &ChatSnapshot) -> String {
        let messages = &snapshot.messages;
        let mut out = String::new();
        while self.printed < messages.len() {
            let idx = self.printed;
            let message = &messages[idx];
            let can_grow = snapshot.streaming
                && message.active
                && message.is_chunk_stream()
                && idx + 1 == messages.len();

            if can_grow || self.streaming.is_some_and(|(at, _)| at == idx) {
                out.push_str(&self.stream_delta(idx, message));
                if can_grow {
                    break;
                }
                out.push('\n');
                self.streaming = None;
                self.printed += 1;
                continue;
            }

            for row in render_message(message, self.style) {
                out.push_str(&row);
                out.push('\n');
            }
            self.printed += 1;
        }
        out
    }

    /// Whether a partially streamed message is still open on screen.
    pub fn mid_stream(&self) -> bool {
        self.streaming.is_some()
    }

    /// Close an open streamed line, e.g. before printing a prompt.
    pub fn finish(&mut self) -> String {
        match self.streaming.take() {
            Some(_) => {
                self.printed += 1;
                "\n".to_string()
            }
            None => String::new(),
        }
    }

    fn stream_delta(&mut self, idx: usize, message: &Message) -> String {
        let mut out = String::new();
        let sent = match self.streaming {
            Some((at, sent)) if at == idx => sent,
            _ => {
                out.push_str(settings::INDENT_1);
                out.push_str(&bot_glyph(message, self.style));
                out.push(' ');
                0
            }
        };
        let total = message.content.chars().count();
        let delta: String = message.content.chars().skip(sent).collect();
        let continuation = format!("\n{}{}", settings::INDENT_1, " ".repeat(GLYPH_COLUMNS));
        let delta = delta.replace('\n', &continuation);
        out.push_str(&paint(&delta, self.style, settings::COLOR_AGENT_TEXT, None));
        self.streaming = Some((idx, total));
        out
    }
}
