use crate::app::state::App;
use crate::{log_composer, log_key_event};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hearth_types::{ComposerField, ComposerTab, FeedTab, FormatStyle};
use tui_textarea::Input;

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    let context = if app.show_help {
        "help"
    } else if app.show_discard_confirmation {
        "discard_confirmation"
    } else if app.is_composer_open() {
        "composer"
    } else if app.reply.is_some() {
        "reply"
    } else {
        "feed"
    };
    log_key_event!(app.log_config, "key={:?} modifiers={:?} context={}", key.code, key.modifiers, context);

    // Priority 1: Help modal (highest priority)
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
            app.toggle_help();
        }
        return Ok(());
    }

    // F1 opens help everywhere, including while typing
    if key.code == KeyCode::F(1) {
        app.toggle_help();
        return Ok(());
    }

    // Priority 2: Discard confirmation over the composer
    if app.show_discard_confirmation {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.cancel_composer(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.keep_editing(),
            _ => {}
        }
        return Ok(());
    }

    // Priority 3: Composer modal
    if app.is_composer_open() {
        return handle_composer_keys(app, key);
    }

    // Priority 4: Reply box under a post
    if app.reply.is_some() {
        return handle_reply_keys(app, key);
    }

    // Priority 5: Feed
    handle_feed_keys(app, key)
}

fn format_for_key(c: char) -> Option<FormatStyle> {
    match c {
        'b' => Some(FormatStyle::Bold),
        'i' => Some(FormatStyle::Italic),
        'h' => Some(FormatStyle::Heading),
        'q' => Some(FormatStyle::Quote),
        'c' => Some(FormatStyle::Code),
        _ => None,
    }
}

pub fn handle_composer_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Modal-wide shortcuts first; they work on both tabs
    match key.code {
        KeyCode::Esc => {
            app.request_cancel_composer();
            return Ok(());
        }
        KeyCode::F(5) => {
            app.publish_composer();
            return Ok(());
        }
        KeyCode::Enter if ctrl => {
            app.publish_composer();
            return Ok(());
        }
        KeyCode::Char('s') if ctrl => {
            app.save_composer_draft();
            return Ok(());
        }
        KeyCode::Char('p') if ctrl => {
            app.toggle_composer_tab();
            return Ok(());
        }
        _ => {}
    }

    let Some(view) = &mut app.composer else {
        return Ok(());
    };

    if view.tab() == ComposerTab::Preview {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => view.preview_scroll = view.preview_scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => view.preview_scroll = view.preview_scroll.saturating_sub(1),
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Tab => {
            view.focus_next();
            log_composer!(app.log_config, "Composer focus: {}", view.focus.label());
            return Ok(());
        }
        KeyCode::BackTab => {
            view.focus_previous();
            log_composer!(app.log_config, "Composer focus: {}", view.focus.label());
            return Ok(());
        }
        KeyCode::Char(c) if alt => {
            if let Some(style) = format_for_key(c) {
                app.apply_format(style);
            }
            return Ok(());
        }
        _ => {}
    }

    let remove_last = key.code == KeyCode::Delete || (ctrl && key.code == KeyCode::Char('d'));

    let focus = view.focus;
    match focus {
        ComposerField::Title => match key.code {
            KeyCode::Char(c) if !ctrl => {
                view.title_input.push(c);
                view.session.update_title(view.title_input.clone());
            }
            KeyCode::Backspace => {
                view.title_input.pop();
                view.session.update_title(view.title_input.clone());
            }
            KeyCode::Enter => view.focus_next(),
            _ => {}
        },
        ComposerField::Content => {
            // Cursor moves leave the draft untouched
            if view.content.input(Input::from(crossterm::event::Event::Key(key))) {
                view.sync_content();
            }
        }
        ComposerField::Tags => match key.code {
            _ if remove_last => app.remove_last_tag(),
            KeyCode::Char(c) if !ctrl => view.tag_input.push(c),
            KeyCode::Backspace => {
                view.tag_input.pop();
            }
            KeyCode::Enter => app.submit_tag(),
            _ => {}
        },
        ComposerField::Media => match key.code {
            _ if remove_last => app.remove_last_media(),
            KeyCode::Char(c) if !ctrl => view.media_input.push(c),
            KeyCode::Backspace => {
                view.media_input.pop();
            }
            KeyCode::Enter => app.submit_media(),
            _ => {}
        },
        ComposerField::Links => match key.code {
            _ if remove_last => app.remove_last_link(),
            KeyCode::Char(c) if !ctrl => view.links.push_char(c),
            KeyCode::Backspace => view.links.pop_char(),
            KeyCode::Enter => app.submit_link(),
            _ => {}
        },
    }

    Ok(())
}

pub fn handle_reply_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => app.cancel_reply(),
        KeyCode::Enter => app.submit_reply(),
        KeyCode::Backspace => {
            if let Some(reply) = &mut app.reply {
                reply.text.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(reply) = &mut app.reply {
                reply.text.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn handle_feed_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
        }
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('n') => app.open_composer(None),
        KeyCode::Char('e') => app.reopen_last_draft(),
        KeyCode::Char('E') => app.edit_selected_post(),
        KeyCode::Char('r') => app.start_reply(),
        KeyCode::Char('j') | KeyCode::Down => app.next_post(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_post(),
        KeyCode::Enter => {
            if app.trigger_focused {
                app.open_composer(None);
            } else {
                app.toggle_selected_comments();
            }
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.set_feed_tab(FeedTab::ALL[index]);
        }
        KeyCode::Char('[') => app.previous_nav(),
        KeyCode::Char(']') => app.next_nav(),
        KeyCode::Char('t') => app.cycle_color_scheme(),
        KeyCode::Char('x') => app.dismiss_welcome(),
        _ => {}
    }
    Ok(())
}
