use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;
use unicode_width::UnicodeWidthChar;

use super::theme::ThemeColors;

/// Words and the whitespace between them, kept in order
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+|\S+").expect("Failed to compile token regex"));

/// Compact count: below 1000 as is, otherwise thousands rounded to one
/// decimal with a trailing ".0" dropped (12600 -> "12.6k", 1999 -> "2k")
pub fn format_count(count: u64) -> String {
    if count < 1000 {
        return count.to_string();
    }
    let thousands = format!("{:.1}", count as f64 / 1000.0);
    format!("{}k", thousands.strip_suffix(".0").unwrap_or(&thousands))
}

/// Relative age shown next to post and comment authors
pub fn format_time_ago(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(*timestamp);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}min ago", minutes)
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_days() < 30 {
        format!("{}d ago", elapsed.num_days())
    } else {
        format_long_date(timestamp)
    }
}

/// "October 16, 2026"
pub fn format_long_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%B %-d, %Y").to_string()
}

/// Cut `text` to fit `max_width` terminal columns, marking the cut with "…"
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Wrap post content to `max_width`, highlighting #hashtags and @mentions
pub fn format_post_content_with_width(
    content: &str,
    is_selected: bool,
    theme: &ThemeColors,
    max_width: usize,
) -> Vec<Line<'static>> {
    let wrap_width = max_width.saturating_sub(4).max(10);
    let mut lines = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }
        for wrapped in textwrap::wrap(line, wrap_width) {
            let mut spans = vec![Span::raw("  ")];
            for token in TOKEN_REGEX.find_iter(&wrapped) {
                spans.push(styled_token(token.as_str(), is_selected, theme));
            }
            lines.push(Line::from(spans));
        }
    }

    lines
}

fn styled_token(token: &str, is_selected: bool, theme: &ThemeColors) -> Span<'static> {
    if token.trim().is_empty() {
        return Span::raw(token.to_string());
    }
    let style = if token.starts_with('#') && token.len() > 1 {
        let color = if is_selected { theme.accent } else { theme.secondary };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else if token.starts_with('@') && token.len() > 1 {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else if is_selected {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    Span::styled(token.to_string(), style)
}
