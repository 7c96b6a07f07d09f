//! Shared text formatting helpers used by terminal rendering.

/// Count visible character width (single-cell approximation).
pub fn visible_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate text for single-line display and replace newlines with spaces.
pub fn truncate_single_line(s: &str, max_chars: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() > max_chars {
        let clipped: String = flat.chars().take(max_chars).collect();
        format!("{}...", clipped.trim_end())
    } else {
        flat
    }
}

/// Right-pad `s` with spaces to exactly `width` visible columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(pad))
}

/// Wrap multi-line text, keeping blank lines as empty rows.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| wrap_line(line, max_width))
        .collect()
}

/// Wrap a single line to fit `max_width`.
///
/// Prefers whitespace boundaries and falls back to hard wrapping long words.
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }
    if line.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = line.chars().collect();
    let mut out = Vec::new();
    let mut start = 0usize;

    while start < chars.len() {
        let end = (start + max_width).min(chars.len());
        if end == chars.len() {
            out.push(chars[start..end].iter().collect());
            break;
        }

        let split = if chars[end].is_whitespace() {
            Some(end)
        } else {
            (start + 1..end).rev().find(|&idx| chars[idx].is_whitespace())
        };
        let stop = split.unwrap_or(end);
        out.push(chars[start..stop].iter().collect());
        start = stop;
        while split.is_some() && start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}
