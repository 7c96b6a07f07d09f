//! Markdown-to-terminal rendering for agent replies.
//!
//! `termimad` lays out lists, headings, code fences and tables as terminal
//! text. Styling is left to the chat view, which tints whole bubbles.

use termimad::MadSkin;

/// Render markdown as plain terminal text wrapped to `width` columns.
pub fn render_markdown(input: &str, width: usize) -> String {
    let skin = MadSkin::no_style();
    let formatted = skin.text(input, Some(width.max(1))).to_string();
    formatted.trim_end_matches('\n').to_string()
}

/// Render markdown as rows ready for the bubble writer.
pub fn render_markdown_lines(input: &str, width: usize) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    render_markdown(input, width)
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}
