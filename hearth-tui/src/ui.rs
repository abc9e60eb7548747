// UI module - split into cohesive submodules for maintainability
pub mod formatting;
pub mod modals;
pub mod theme;
mod feed;

// Re-export main render function
pub use self::render_main::render;

// Main render logic
mod render_main {
    use ratatui::{
        layout::Alignment,
        style::{Modifier, Style},
        text::{Line, Span},
        widgets::{Block, Borders, Clear, Paragraph},
        Frame,
    };

    use super::feed::render_main_screen;
    use super::modals::{render_composer_modal, render_discard_confirmation_modal, render_help_modal};
    use super::theme::get_theme_colors;
    use crate::app::App;

    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 20;

    /// Render the UI
    pub fn render(app: &mut App, frame: &mut Frame) {
        let area = frame.area();

        let theme = get_theme_colors(app);

        frame.render_widget(Clear, area);

        let background = Block::default().style(Style::default().bg(theme.background));
        frame.render_widget(background, area);

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let warning = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Terminal Too Small",
                    Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Minimum size: {}x{}", MIN_WIDTH, MIN_HEIGHT),
                    Style::default().fg(theme.text),
                )),
                Line::from(Span::styled(
                    format!("Current size: {}x{}", area.width, area.height),
                    Style::default().fg(theme.warning),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Please resize your terminal window",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );

            frame.render_widget(warning, area);
            return;
        }

        render_main_screen(frame, app);

        // Overlays, bottom to top
        if app.is_composer_open() {
            render_composer_modal(frame, app, area);
        }
        if app.show_discard_confirmation {
            render_discard_confirmation_modal(frame, app, area);
        }
        if app.show_help {
            render_help_modal(frame, app, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::app::App;
    use crate::fixtures::{Fixtures, SAMPLE_FIXTURES};
    use crate::logging::LogConfig;
    use crate::settings::Settings;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_to_string(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut result = String::new();

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    result.push_str(cell.symbol());
                }
            }
            while result.ends_with(' ') {
                result.pop();
            }
            result.push('\n');
        }
        result
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn sample_app() -> App {
        App::new(
            Settings::default(),
            Fixtures::from_json(SAMPLE_FIXTURES).unwrap(),
            LogConfig::disabled(),
        )
    }

    #[test]
    fn test_feed_shows_trigger_and_posts() {
        let mut app = sample_app();
        let screen = draw(&mut app, 100, 40);

        assert!(screen.contains("What's on your mind, You?"));
        assert!(screen.contains("How to optimize remote work?"));
        assert!(screen.contains("1 All"));
        assert!(!screen.contains("Create Post"));
    }

    #[test]
    fn test_open_composer_renders_edit_tab() {
        let mut app = sample_app();
        app.open_composer(None);
        let screen = draw(&mut app, 100, 40);

        assert!(screen.contains("Create Post"));
        assert!(screen.contains("Edit"));
        assert!(screen.contains("Preview"));
        assert!(screen.contains("0 words"));
    }

    #[test]
    fn test_preview_tab_renders_untitled_draft() {
        let mut app = sample_app();
        app.open_composer(None);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL))
            .unwrap();
        let screen = draw(&mut app, 100, 40);

        assert!(screen.contains("Untitled"));
        assert!(!screen.contains("0 words"));
    }

    #[test]
    fn test_discard_prompt_draws_over_composer() {
        let mut app = sample_app();
        app.open_composer(None);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE))
            .unwrap();
        app.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        let screen = draw(&mut app, 100, 40);

        assert!(screen.contains("Unsaved Changes"));
    }

    #[test]
    fn test_editing_a_post_titles_the_modal() {
        let mut app = sample_app();
        app.edit_selected_post();
        let screen = draw(&mut app, 100, 40);

        assert!(screen.contains("Edit Post"));
        assert!(!screen.contains("Create Post"));
    }

    #[test]
    fn test_reply_box_shows_live_word_count() {
        let mut app = sample_app();
        app.start_reply();
        for c in "thanks for sharing".chars() {
            app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
                .unwrap();
        }
        let screen = draw(&mut app, 120, 50);

        assert!(screen.contains("Reply: thanks for sharing"));
        assert!(screen.contains("3 words"));
        assert!(screen.contains("Enter: Post reply"));
    }

    #[test]
    fn test_small_terminal_shows_warning() {
        let mut app = sample_app();
        let screen = draw(&mut app, 50, 15);

        assert!(screen.contains("Terminal Too Small"));
        assert!(screen.contains("Current size: 50x15"));
    }
}
