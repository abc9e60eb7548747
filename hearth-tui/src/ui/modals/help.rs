use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::App;

type ShortcutGroup = (&'static str, Vec<(&'static str, &'static str)>);

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_rect(80, 85, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];
    for (category, items) in get_shortcuts_for_context(app) {
        lines.push(Line::from(Span::styled(
            category,
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<18}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    let help_content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_content, modal_area);
}

/// Shortcuts relevant to what is on screen
pub fn get_shortcuts_for_context(app: &App) -> Vec<ShortcutGroup> {
    let mut shortcuts = vec![("Global", vec![("? / F1", "Toggle this help"), ("Esc", "Close help")])];

    if app.is_composer_open() {
        add_composer_shortcuts(&mut shortcuts);
    } else if app.reply.is_some() {
        shortcuts.push((
            "Reply",
            vec![("Enter", "Post reply"), ("Backspace", "Delete a character"), ("Esc", "Close reply")],
        ));
    } else {
        add_feed_shortcuts(&mut shortcuts);
    }

    shortcuts
}

fn add_feed_shortcuts(shortcuts: &mut Vec<ShortcutGroup>) {
    shortcuts.push((
        "Feed",
        vec![
            ("↓/j", "Next post"),
            ("↑/k", "Previous post / focus composer field"),
            ("Enter", "Expand comments / open composer"),
            ("1-4", "All, Latest, Popular, Topics"),
            ("[ / ]", "Previous / next section"),
            ("t", "Cycle color scheme"),
            ("x", "Dismiss welcome banner"),
            ("q / Esc", "Quit"),
        ],
    ));
    shortcuts.push((
        "Posting",
        vec![
            ("n", "New post"),
            ("e", "Reopen last saved draft"),
            ("E", "Edit selected post"),
            ("r", "Reply to selected post"),
        ],
    ));
}

fn add_composer_shortcuts(shortcuts: &mut Vec<ShortcutGroup>) {
    shortcuts.push((
        "Composer",
        vec![
            ("Tab / Shift+Tab", "Next / previous field"),
            ("Ctrl+P", "Toggle Edit / Preview"),
            ("Ctrl+S", "Save draft"),
            ("Ctrl+Enter / F5", "Publish"),
            ("Esc", "Cancel"),
        ],
    ));
    shortcuts.push((
        "Formatting",
        vec![
            ("Alt+B", "Bold"),
            ("Alt+I", "Italic"),
            ("Alt+H", "Heading"),
            ("Alt+Q", "Quote"),
            ("Alt+C", "Code block"),
        ],
    ));
    shortcuts.push((
        "Tags, Media, Links",
        vec![
            ("Enter", "Add what you typed"),
            ("Del / Ctrl+D", "Remove the last item"),
            ("a.png, b.mp4", "Attach several files at once"),
            (":caption", "Caption the newest attachment"),
        ],
    ));
}
