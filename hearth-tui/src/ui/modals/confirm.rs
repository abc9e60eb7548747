use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_fixed;
use crate::app::App;

/// Render the discard-changes prompt over the composer
pub fn render_discard_confirmation_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    let modal_area = centered_fixed(48, 9, area);
    frame.render_widget(Clear, modal_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your post has unsaved changes.",
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            "Discard them and close the composer?",
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled(": Discard  ", Style::default().fg(theme.text)),
            Span::styled("N / Esc", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::styled(": Keep editing", Style::default().fg(theme.text)),
        ]),
    ];

    let modal = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(" Unsaved Changes ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.warning).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(modal, modal_area);
}
