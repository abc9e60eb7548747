use chrono::{DateTime, Utc};
use hearth_types::{Author, Draft, MediaRef};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::ui::formatting::format_long_date;
use crate::ui::theme::ThemeColors;

/// Read-only projection of a draft as it would appear in the feed.
///
/// Fields appear in the order held and are only wrapped to `width`.
pub fn preview_lines(
    draft: &Draft,
    author: &Author,
    date: &DateTime<Utc>,
    theme: &ThemeColors,
    width: usize,
) -> Vec<Line<'static>> {
    let wrap_width = width.max(10);
    let mut lines = vec![Line::from(vec![
        Span::styled(author.name.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(author.handle(), Style::default().fg(theme.primary)),
        Span::styled(format!(" · {}", format_long_date(date)), Style::default().fg(theme.text_dim)),
    ])];
    lines.push(Line::from(""));

    if draft.title.is_empty() {
        lines.push(Line::from(Span::styled(
            "Untitled",
            Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
        )));
    } else {
        for wrapped in textwrap::wrap(&draft.title, wrap_width) {
            lines.push(Line::from(Span::styled(
                wrapped.into_owned(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )));
        }
    }

    if !draft.content.is_empty() {
        lines.push(Line::from(""));
        for line in draft.content.lines() {
            if line.is_empty() {
                lines.push(Line::from(""));
                continue;
            }
            for wrapped in textwrap::wrap(line, wrap_width) {
                lines.push(Line::from(Span::styled(wrapped.into_owned(), Style::default().fg(theme.text))));
            }
        }
    }

    if !draft.media.is_empty() {
        lines.push(Line::from(""));
        lines.extend(draft.media.iter().map(|media| media_line(media, theme)));
    }

    for link in &draft.links {
        lines.push(Line::from(""));
        let title = link.title.clone().unwrap_or_else(|| "Untitled Link".to_string());
        let description = link
            .description
            .clone()
            .unwrap_or_else(|| "No description available".to_string());
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(theme.border)),
            Span::styled(title, Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(theme.border)),
            Span::styled(description, Style::default().fg(theme.text)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("│ ", Style::default().fg(theme.border)),
            Span::styled(link.url.clone(), Style::default().fg(theme.text_dim).add_modifier(Modifier::UNDERLINED)),
        ]));
    }

    if !draft.tags.is_empty() {
        lines.push(Line::from(""));
        let mut spans = Vec::with_capacity(draft.tags.len() * 2);
        for tag in &draft.tags {
            spans.push(Span::styled(
                format!("[{}]", tag),
                Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
        spans.pop();
        lines.push(Line::from(spans));
    }

    lines
}

fn media_line(media: &MediaRef, theme: &ThemeColors) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("[{}] ", media.kind.as_str()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(media.source_uri.clone(), Style::default().fg(theme.text_dim)),
    ];
    if let Some(caption) = &media.caption {
        spans.push(Span::styled(
            format!(" - {}", caption),
            Style::default().fg(theme.text).add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hearth_types::{ColorScheme, LinkRef, MediaKind};

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| &*s.content).collect())
            .collect()
    }

    fn render(draft: &Draft) -> Vec<String> {
        let author = Author {
            name: "Olivia Martin".to_string(),
            username: "OliviaM".to_string(),
        };
        let date = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let theme = ThemeColors::for_scheme(ColorScheme::Default);
        text(&preview_lines(draft, &author, &date, &theme, 60))
    }

    #[test]
    fn test_empty_draft_shows_untitled() {
        let lines = render(&Draft::default());
        assert_eq!(lines[0], "Olivia Martin @OliviaM · October 16, 2026");
        assert!(lines.contains(&"Untitled".to_string()));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_fields_are_shown_as_held() {
        let draft = Draft {
            title: "Remote work".to_string(),
            content: "first line\n\n  indented".to_string(),
            tags: vec!["Career".to_string(), "Remote Work".to_string()],
            media: vec![MediaRef {
                id: "m1".to_string(),
                kind: MediaKind::Video,
                source_uri: "file:///tmp/clip.mp4".to_string(),
                caption: Some("Standup".to_string()),
            }],
            links: vec![LinkRef {
                id: "l1".to_string(),
                url: "https://example.com".to_string(),
                title: None,
                description: None,
                thumbnail_uri: None,
            }],
        };
        let lines = render(&draft);

        assert!(lines.contains(&"Remote work".to_string()));
        assert!(lines.contains(&"first line".to_string()));
        assert!(lines.contains(&"[video] file:///tmp/clip.mp4 - Standup".to_string()));
        assert!(lines.contains(&"│ Untitled Link".to_string()));
        assert!(lines.contains(&"│ No description available".to_string()));
        assert!(lines.contains(&"│ https://example.com".to_string()));
        assert_eq!(lines.last().unwrap(), "[Career] [Remote Work]");
    }

    #[test]
    fn test_long_title_wraps_to_width() {
        let draft = Draft {
            title: "word ".repeat(30),
            ..Default::default()
        };
        let author = Author { name: "A".into(), username: "a".into() };
        let theme = ThemeColors::for_scheme(ColorScheme::Dark);
        let lines = preview_lines(&draft, &author, &Utc::now(), &theme, 20);
        assert!(lines.iter().all(|l| l.width() <= 45));
        assert!(lines.len() > 4);
    }
}
