use chrono::{DateTime, Utc};
use hearth_types::{FeedPost, FeedTab, MediaKind, NavSection};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use super::formatting::{format_count, format_post_content_with_width, format_time_ago, truncate_to_width};
use super::theme::{get_theme_colors, ThemeColors};
use crate::app::{App, MessageKind};
use crate::composer::word_count;
use crate::log_rendering;

/// Lines of post content shown before a post is expanded
const COLLAPSED_CONTENT_LINES: usize = 3;
const SIDEBAR_WIDTH: u16 = 24;

pub fn render_main_screen(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    render_sidebar(frame, app, body[0]);
    match app.nav {
        NavSection::Home | NavSection::Feed => render_feed_column(frame, app, body[1]),
        section => render_placeholder(frame, app, section, body[1]),
    }

    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let author = app.feed.author();
    let line = Line::from(vec![
        Span::styled(" Hearth ", Style::default().fg(theme.background).bg(theme.primary).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", app.nav.as_str()), Style::default().fg(theme.text)),
        Span::styled("   signed in as ", Style::default().fg(theme.text_dim)),
        Span::styled(author.name.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(author.handle(), Style::default().fg(theme.primary)),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(header, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let profile = app.profile.as_ref().filter(|p| !p.is_complete());

    let constraints = if profile.is_some() {
        vec![Constraint::Length(NavSection::ALL.len() as u16 + 2), Constraint::Length(5), Constraint::Min(0)]
    } else {
        vec![Constraint::Length(NavSection::ALL.len() as u16 + 2), Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let nav_lines: Vec<Line> = NavSection::ALL
        .iter()
        .map(|section| {
            if *section == app.nav {
                Line::from(Span::styled(
                    format!("▸ {}", section.as_str()),
                    Style::default().fg(theme.primary).bg(theme.highlight_bg).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(format!("  {}", section.as_str()), Style::default().fg(theme.text)))
            }
        })
        .collect();

    let nav = Paragraph::new(nav_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(nav, chunks[0]);

    if let Some(profile) = profile {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Complete your profile ")
                    .border_style(Style::default().fg(theme.warning)),
            )
            .gauge_style(Style::default().fg(theme.success).bg(theme.highlight_bg))
            .percent(profile.completion_percent().min(100) as u16)
            .label(format!("{}/{} steps", profile.completed_steps.min(profile.total_steps), profile.total_steps));
        frame.render_widget(gauge, chunks[1]);
    }
}

fn render_feed_column(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut constraints = Vec::new();
    if app.welcome.is_some() {
        constraints.push(Constraint::Length(4));
    }
    constraints.extend([
        Constraint::Length(3), // Composer trigger
        Constraint::Length(1), // Feed tabs
        Constraint::Min(0),    // Posts
    ]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut index = 0;
    if app.welcome.is_some() {
        render_welcome(frame, app, chunks[index]);
        index += 1;
    }
    render_trigger(frame, app, chunks[index]);
    render_feed_tabs(frame, app, chunks[index + 1]);
    render_posts(frame, app, chunks[index + 2]);
}

fn render_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let Some(welcome) = &app.welcome else {
        return;
    };
    let theme = get_theme_colors(app);
    let banner = Paragraph::new(vec![
        Line::from(Span::styled(welcome.title.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(welcome.description.clone(), Style::default().fg(theme.text_dim))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Welcome ")
            .title_bottom(Line::from(" x: dismiss ").alignment(Alignment::Right))
            .border_style(Style::default().fg(theme.secondary)),
    );
    frame.render_widget(banner, area);
}

/// Placeholder field that opens the composer; it holds no draft data
fn render_trigger(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let first_name = app.feed.author().name.split_whitespace().next().unwrap_or("there").to_string();
    let border = if app.trigger_focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };

    let trigger = Paragraph::new(Line::from(vec![
        Span::styled(format!("What's on your mind, {}?", first_name), Style::default().fg(theme.text_dim)),
        Span::styled("  (n)", Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(trigger, area);
}

fn render_feed_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let titles: Vec<String> = FeedTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!("{} {}", i + 1, tab.as_str()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.feed_tab.index())
        .style(Style::default().fg(theme.text_dim))
        .highlight_style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD))
        .divider(" · ");
    frame.render_widget(tabs, area);
}

fn render_posts(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = get_theme_colors(app);
    let now = Utc::now();
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem<'static>> = {
        let posts = app.visible_posts();
        log_rendering!(app.log_config, "Rendering {} posts, tab={}", posts.len(), app.feed_tab.as_str());
        posts
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let selected = !app.trigger_focused && app.list_state.selected() == Some(i);
                let expanded = app.expanded_posts.contains(&post.id);
                let reply = app
                    .reply
                    .as_ref()
                    .filter(|r| r.post_id == post.id)
                    .map(|r| r.text.as_str());
                ListItem::new(post_lines(post, selected, expanded, reply, &theme, width, &now))
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));

    if items.is_empty() {
        let empty = Paragraph::new("No posts yet. Press n to write the first one.")
            .style(Style::default().fg(theme.text_dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let highlight = if app.trigger_focused {
        Style::default()
    } else {
        Style::default().bg(theme.highlight_bg)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn post_lines(
    post: &FeedPost,
    selected: bool,
    expanded: bool,
    reply: Option<&str>,
    theme: &ThemeColors,
    width: usize,
    now: &DateTime<Utc>,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(post.author.name.clone(), Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(post.author.handle(), Style::default().fg(theme.primary)),
        Span::styled(format!(" · {}", format_time_ago(&post.created_at, now)), Style::default().fg(theme.text_dim)),
    ])];

    lines.push(Line::from(Span::styled(
        truncate_to_width(&post.title, width),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )));

    let mut content = format_post_content_with_width(&post.content, selected, theme, width);
    if !expanded && content.len() > COLLAPSED_CONTENT_LINES {
        content.truncate(COLLAPSED_CONTENT_LINES);
        content.push(Line::from(Span::styled("  …", Style::default().fg(theme.text_dim))));
    }
    lines.extend(content);

    let mut extras = Vec::new();
    for tag in &post.tags {
        extras.push(Span::styled(format!("[{}] ", tag), Style::default().fg(theme.secondary)));
    }
    let images = post.media.iter().filter(|m| m.kind == MediaKind::Image).count();
    let videos = post.media.len() - images;
    if images > 0 {
        extras.push(Span::styled(format!("[image ×{}] ", images), Style::default().fg(theme.accent)));
    }
    if videos > 0 {
        extras.push(Span::styled(format!("[video ×{}] ", videos), Style::default().fg(theme.accent)));
    }
    for link in &post.links {
        let label = link.title.clone().unwrap_or_else(|| link.url.clone());
        extras.push(Span::styled(format!("[link: {}] ", label), Style::default().fg(theme.primary)));
    }
    if !extras.is_empty() {
        lines.push(Line::from(extras));
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{} likes · {} dislikes · {} comments",
            format_count(post.reactions.likes),
            format_count(post.reactions.dislikes),
            format_count(post.reactions.comments)
        ),
        Style::default().fg(theme.text_dim),
    )));

    if expanded {
        for comment in &post.comments {
            lines.push(comment_line(&comment.author.name, &comment.text, comment.reactions.likes, theme, width));
        }
    } else if let Some(best) = post.best_comment() {
        lines.push(comment_line(&best.author.name, &best.text, best.reactions.likes, theme, width));
        if post.comments.len() > 1 {
            lines.push(Line::from(Span::styled(
                format!("    Enter: show all {} comments", post.comments.len()),
                Style::default().fg(theme.text_dim).add_modifier(Modifier::ITALIC),
            )));
        }
    }

    if let Some(text) = reply {
        lines.push(reply_line(text, theme, width));
    }

    lines.push(Line::from(""));
    lines
}

/// Reply input with its live word count
fn reply_line(text: &str, theme: &ThemeColors, width: usize) -> Line<'static> {
    let words = word_count(text);
    let suffix = format!(" · {} {}", words, if words == 1 { "word" } else { "words" });
    let prefix = "  Reply: ";
    let room = width.saturating_sub(prefix.len() + suffix.chars().count() + 1);
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        Span::styled(truncate_to_width(text, room), Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.primary)),
        Span::styled(suffix, Style::default().fg(theme.text_dim)),
    ])
}

fn comment_line(name: &str, text: &str, likes: u64, theme: &ThemeColors, width: usize) -> Line<'static> {
    let prefix = format!("  ↳ {}: ", name);
    let suffix = format!(" · {} likes", format_count(likes));
    let room = width.saturating_sub(prefix.chars().count() + suffix.chars().count());
    Line::from(vec![
        Span::styled(prefix, Style::default().fg(theme.secondary)),
        Span::styled(truncate_to_width(text, room), Style::default().fg(theme.text)),
        Span::styled(suffix, Style::default().fg(theme.text_dim)),
    ])
}

fn render_placeholder(frame: &mut Frame, app: &App, section: NavSection, area: Rect) {
    let theme = get_theme_colors(app);
    let text = match section {
        NavSection::Groups => "You have not joined any groups yet.",
        NavSection::Events => "No upcoming events.",
        NavSection::Help => "Press ? for keyboard shortcuts.",
        NavSection::Home | NavSection::Feed => "",
    };
    let placeholder = Paragraph::new(text)
        .style(Style::default().fg(theme.text_dim))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", section.as_str()))
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(placeholder, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let line = match &app.message {
        Some(message) => {
            let color = match message.kind {
                MessageKind::Info => theme.success,
                MessageKind::Error => theme.error,
            };
            Line::from(Span::styled(format!(" {}", message.text), Style::default().fg(color)))
        }
        None if app.reply.is_some() => Line::from(Span::styled(
            " Enter: Post reply | Esc: Close reply",
            Style::default().fg(theme.text_dim),
        )),
        None => Line::from(Span::styled(
            " n: New post | e: Reopen draft | 1-4: Tabs | t: Theme | ?: Help | q: Quit",
            Style::default().fg(theme.text_dim),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
