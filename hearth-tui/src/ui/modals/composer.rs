use chrono::Utc;
use hearth_types::{ComposerField, ComposerTab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::super::theme::{get_theme_colors, ThemeColors};
use super::preview::preview_lines;
use super::utils::centered_rect;
use crate::app::{App, ComposerView};

const CURSOR: &str = "▏";

/// Render the composer modal with its Edit / Preview tabs
pub fn render_composer_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.composer else {
        return;
    };
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(80, 90, area);
    frame.render_widget(Clear, modal_area);

    let title = if app.is_editing_post() { " Edit Post " } else { " Create Post " };
    let outer_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));
    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tabs
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    let tab_titles = [ComposerTab::Edit, ComposerTab::Preview].map(|tab| tab.as_str());
    let selected = match view.tab() {
        ComposerTab::Edit => 0,
        ComposerTab::Preview => 1,
    };
    let tabs = Tabs::new(tab_titles.to_vec())
        .select(selected)
        .style(Style::default().fg(theme.text_dim))
        .highlight_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(" | ");
    frame.render_widget(tabs, chunks[0]);

    match view.tab() {
        ComposerTab::Edit => render_edit_tab(frame, view, &theme, chunks[1]),
        ComposerTab::Preview => render_preview_tab(frame, app, view, &theme, chunks[1]),
    }

    let instructions = match view.tab() {
        ComposerTab::Edit => "Tab: Next field | Ctrl+P: Preview | Ctrl+S: Save draft | F5: Publish | Esc: Cancel",
        ComposerTab::Preview => "↑/↓: Scroll | Ctrl+P: Edit | Ctrl+S: Save draft | F5: Publish | Esc: Cancel",
    };
    frame.render_widget(
        Paragraph::new(instructions)
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center),
        chunks[2],
    );
}

fn field_block<'a>(title: String, focused: bool, theme: &ThemeColors) -> Block<'a> {
    let border = if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };
    Block::default().borders(Borders::ALL).title(title).border_style(border)
}

/// Single-line input: typed text plus a cursor when focused, or a dim placeholder
fn input_line(text: &str, placeholder: &str, focused: bool, theme: &ThemeColors) -> Line<'static> {
    let mut spans = Vec::new();
    if text.is_empty() && !focused {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(theme.text_dim)));
    } else {
        spans.push(Span::styled(text.to_string(), Style::default().fg(theme.text)));
    }
    if focused {
        spans.push(Span::styled(CURSOR, Style::default().fg(theme.primary)));
    }
    Line::from(spans)
}

fn render_edit_tab(frame: &mut Frame, view: &ComposerView, theme: &ThemeColors, area: Rect) {
    let draft = view.session.draft();
    let media_height = (3 + draft.media.len() + view.attach_errors.len()).min(8) as u16;
    let link_status = usize::from(view.links.is_loading() || view.links.error().is_some());
    let links_height = (3 + draft.links.len() + link_status).min(7) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title
            Constraint::Min(5),                // Content
            Constraint::Length(1),             // Word count
            Constraint::Length(3),             // Tags
            Constraint::Length(media_height),  // Media
            Constraint::Length(links_height),  // Links
        ])
        .split(area);

    let focus = view.focus;

    let title = Paragraph::new(input_line(
        &view.title_input,
        "Add a title",
        focus == ComposerField::Title,
        theme,
    ))
    .block(field_block(" Title ".to_string(), focus == ComposerField::Title, theme));
    frame.render_widget(title, chunks[0]);

    let content_block = field_block(
        " Content (Alt+B/I/H/Q/C to format) ".to_string(),
        focus == ComposerField::Content,
        theme,
    );
    let content_inner = content_block.inner(chunks[1]);
    frame.render_widget(content_block, chunks[1]);
    frame.render_widget(&view.content, content_inner);

    let words = view.session.word_count();
    let noun = if words == 1 { "word" } else { "words" };
    frame.render_widget(
        Paragraph::new(format!("{} {}", words, noun))
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Right),
        chunks[2],
    );

    render_tags_field(frame, view, theme, chunks[3]);
    render_media_field(frame, view, theme, chunks[4]);
    render_links_field(frame, view, theme, chunks[5]);
}

fn render_tags_field(frame: &mut Frame, view: &ComposerView, theme: &ThemeColors, area: Rect) {
    let focused = view.focus == ComposerField::Tags;
    let mut spans = Vec::new();
    for tag in &view.session.draft().tags {
        spans.push(Span::styled(
            format!("[{}]", tag),
            Style::default().fg(theme.secondary).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }
    spans.extend(input_line(&view.tag_input, "Add a tag", focused, theme).spans);

    let tags = Paragraph::new(Line::from(spans)).block(field_block(" Tags ".to_string(), focused, theme));
    frame.render_widget(tags, area);
}

fn render_media_field(frame: &mut Frame, view: &ComposerView, theme: &ThemeColors, area: Rect) {
    let focused = view.focus == ComposerField::Media;
    let draft = view.session.draft();
    let policy = view.session.policy();

    let mut lines: Vec<Line> = draft
        .media
        .iter()
        .map(|media| {
            let name = view
                .session
                .uploader()
                .file_name(&media.id)
                .map(str::to_string)
                .unwrap_or_else(|| media.source_uri.clone());
            let mut spans = vec![
                Span::styled(format!("[{}] ", media.kind.as_str()), Style::default().fg(theme.accent)),
                Span::styled(name, Style::default().fg(theme.text)),
            ];
            if let Some(size) = view.session.uploader().file_size(&media.id) {
                spans.push(Span::styled(format!(" ({})", format_bytes(size)), Style::default().fg(theme.text_dim)));
            }
            if let Some(caption) = &media.caption {
                spans.push(Span::styled(
                    format!(" - {}", caption),
                    Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
                ));
            }
            Line::from(spans)
        })
        .collect();

    lines.extend(
        view.attach_errors
            .iter()
            .map(|err| Line::from(Span::styled(format!("✗ {}", err), Style::default().fg(theme.error)))),
    );
    lines.push(input_line(&view.media_input, "Path to an image or video", focused, theme));

    let title = format!(
        " Media {}/{} ({}) ",
        draft.media.len(),
        policy.max_attachments,
        policy.accepted_summary()
    );
    let media = Paragraph::new(lines)
        .block(field_block(title, focused, theme))
        .wrap(Wrap { trim: true });
    frame.render_widget(media, area);
}

fn render_links_field(frame: &mut Frame, view: &ComposerView, theme: &ThemeColors, area: Rect) {
    let focused = view.focus == ComposerField::Links;
    let mut lines: Vec<Line> = view
        .session
        .draft()
        .links
        .iter()
        .map(|link| {
            let title = link.title.clone().unwrap_or_else(|| "Untitled Link".to_string());
            Line::from(vec![
                Span::styled(title, Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", link.url), Style::default().fg(theme.text_dim)),
            ])
        })
        .collect();

    lines.push(input_line(view.links.input(), "https://...", focused && !view.links.is_loading(), theme));
    if view.links.is_loading() {
        lines.push(Line::from(Span::styled(
            "Loading preview...",
            Style::default().fg(theme.warning).add_modifier(Modifier::ITALIC),
        )));
    } else if let Some(err) = view.links.error() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(theme.error))));
    }

    let links = Paragraph::new(lines).block(field_block(" Links ".to_string(), focused, theme));
    frame.render_widget(links, area);
}

fn render_preview_tab(frame: &mut Frame, app: &App, view: &ComposerView, theme: &ThemeColors, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Preview ")
        .border_style(Style::default().fg(theme.border));
    let width = block.inner(area).width as usize;
    let lines = preview_lines(view.session.draft(), app.feed.author(), &Utc::now(), theme, width);

    let preview = Paragraph::new(lines)
        .block(block)
        .scroll((view.preview_scroll, 0));
    frame.render_widget(preview, area);
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
