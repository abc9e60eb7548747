use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use hearth_types::{Draft, FeedPost, FeedTab, FormatStyle};
use ratatui::style::Style;
use ratatui::widgets::ListState;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;

use crate::composer::{ComposerSession, HostPreviewProvider, LinkEmbedder};
use crate::feed::FeedStore;
use crate::fixtures::Fixtures;
use crate::logging::LogConfig;
use crate::settings::Settings;
use crate::ui::theme::ThemeColors;
use crate::{log_attachment, log_collaborator, log_composer};

pub mod handlers;
pub mod state;
pub use state::*;


impl App {
    pub fn new(settings: Settings, fixtures: Fixtures, log_config: LogConfig) -> Self {
        let feed = FeedStore::new(fixtures.posts, settings.identity());
        let mut list_state = ListState::default();
        if !feed.posts().is_empty() {
            list_state.select(Some(0));
        }

        Self {
            running: true,
            feed,
            list_state,
            feed_tab: FeedTab::All,
            nav: hearth_types::NavSection::Feed,
            composer: None,
            reply: None,
            trigger_focused: false,
            show_help: false,
            show_discard_confirmation: false,
            welcome: fixtures.welcome,
            profile: fixtures.profile,
            expanded_posts: HashSet::new(),
            message: None,
            settings,
            log_config,
        }
    }

    pub fn theme(&self) -> ThemeColors {
        ThemeColors::for_scheme(self.settings.ui.color_scheme)
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            kind: MessageKind::Info,
            shown_at: Instant::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            kind: MessageKind::Error,
            shown_at: Instant::now(),
        });
    }

    /// Clear the status message once it has been visible for `MESSAGE_TTL`
    pub fn clear_expired_messages(&mut self, now: Instant) {
        if let Some(message) = &self.message {
            if now.saturating_duration_since(message.shown_at) > MESSAGE_TTL {
                self.message = None;
            }
        }
    }

    /// Advance timers: resolves a pending link preview and expires messages
    pub fn tick(&mut self, now: Instant) {
        if let Some(view) = &mut self.composer {
            if let Some(link) = view.links.poll(now, &HostPreviewProvider) {
                log_attachment!(self.log_config, "Link preview resolved: {}", link.url);
                view.session.add_link(link);
            }
        }
        self.clear_expired_messages(now);
    }

    /// Poll for events with timeout
    pub fn poll_event(&mut self, timeout: Duration) -> Result<bool> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key_event(key)?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key_event(self, key)
    }

    // ============================================================================
    // COMPOSER LIFECYCLE
    // ============================================================================

    pub fn is_composer_open(&self) -> bool {
        self.composer.is_some()
    }

    /// Open the composer modal, empty or populated from `initial`.
    /// Ignored while a composer is already open.
    pub fn open_composer(&mut self, initial: Option<Draft>) {
        if self.composer.is_some() {
            return;
        }
        let session = ComposerSession::open(initial, self.settings.media_policy());
        let links = LinkEmbedder::new(self.settings.link_preview_delay());
        let mut view = ComposerView::new(session, links);
        self.apply_composer_styling(&mut view.content);

        log_composer!(self.log_config, "Composer opened, dirty={}", view.session.is_dirty());
        self.trigger_focused = false;
        self.show_discard_confirmation = false;
        self.composer = Some(view);
    }

    /// Reopen the most recently saved draft
    pub fn reopen_last_draft(&mut self) {
        match self.feed.latest_draft().cloned() {
            Some(draft) => self.open_composer(Some(draft)),
            None => self.set_message("No saved drafts yet"),
        }
    }

    /// Open the selected post in the composer; publishing replaces it
    pub fn edit_selected_post(&mut self) {
        if self.composer.is_some() {
            return;
        }
        let Some(id) = self.selected_post().map(|p| p.id) else {
            return;
        };
        if let Some(draft) = self.feed.begin_edit(id) {
            log_composer!(self.log_config, "Editing post {}", id);
            self.open_composer(Some(draft));
        }
    }

    /// True while the open composer edits an existing post
    pub fn is_editing_post(&self) -> bool {
        self.composer.is_some() && self.feed.editing().is_some()
    }

    pub fn save_composer_draft(&mut self) {
        let Some(view) = self.composer.take() else {
            return;
        };
        log_collaborator!(self.log_config, "Handing draft to feed store");
        view.session.save_draft(&mut self.feed);
        self.show_discard_confirmation = false;
        self.set_message("Draft saved (press e to reopen)");
    }

    pub fn publish_composer(&mut self) {
        let Some(view) = self.composer.take() else {
            return;
        };
        log_collaborator!(self.log_config, "Handing post to feed store");
        let edited = self.feed.editing();
        view.session.publish(&mut self.feed);
        self.show_discard_confirmation = false;

        let shown = edited.or_else(|| self.feed.posts().first().map(|p| p.id));
        if let Some(id) = shown {
            self.select_post(id);
        }
        self.set_message(if edited.is_some() { "Post updated" } else { "Post published" });
    }

    /// Discard the open draft without asking
    pub fn cancel_composer(&mut self) {
        let Some(view) = self.composer.take() else {
            return;
        };
        view.session.cancel(&mut self.feed);
        self.show_discard_confirmation = false;
    }

    /// Esc in the composer: confirm first when edits would be lost
    pub fn request_cancel_composer(&mut self) {
        let dirty = self
            .composer
            .as_ref()
            .map(|view| view.session.is_dirty())
            .unwrap_or(false);

        if dirty && self.settings.composer.confirm_discard {
            log_composer!(self.log_config, "Asking before discarding edited draft");
            self.show_discard_confirmation = true;
        } else {
            self.cancel_composer();
        }
    }

    pub fn keep_editing(&mut self) {
        self.show_discard_confirmation = false;
    }

    pub fn toggle_composer_tab(&mut self) {
        if let Some(view) = &mut self.composer {
            let tab = view.tab().toggled();
            view.session.switch_tab(tab);
            view.preview_scroll = 0;
            log_composer!(self.log_config, "Composer tab: {}", tab.as_str());
        }
    }

    pub fn apply_format(&mut self, style: FormatStyle) {
        if let Some(view) = &mut self.composer {
            view.session.apply_format(style);
            view.reload_content();
        }
    }

    // ============================================================================
    // COMPOSER FIELDS
    // ============================================================================

    pub fn submit_tag(&mut self) {
        let Some(view) = &mut self.composer else {
            return;
        };
        let input = std::mem::take(&mut view.tag_input);
        if !view.session.add_tag(&input) && !input.trim().is_empty() {
            self.set_message(format!("Tag \"{}\" already added", input.trim()));
        }
    }

    pub fn remove_last_tag(&mut self) {
        if let Some(view) = &mut self.composer {
            if let Some(tag) = view.session.draft().tags.last().cloned() {
                view.session.remove_tag(&tag);
            }
        }
    }

    /// Attach the comma-separated paths typed in the media input.
    ///
    /// Input starting with `:` sets the caption of the newest attachment.
    pub fn submit_media(&mut self) {
        let Some(view) = &mut self.composer else {
            return;
        };
        let input = std::mem::take(&mut view.media_input);
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        if let Some(caption) = input.strip_prefix(':') {
            if let Some(id) = view.session.draft().media.last().map(|m| m.id.clone()) {
                view.session.set_media_caption(&id, caption);
            }
            return;
        }

        let paths: Vec<PathBuf> = input
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(expand_home)
            .collect();

        let report = view.session.attach_files(&paths);
        view.attach_errors = report
            .rejected
            .iter()
            .map(|(path, err)| match err {
                crate::composer::AttachError::Io { .. } => err.to_string(),
                _ => format!("{}: {}", display_name(path), err),
            })
            .collect();

        log_attachment!(
            self.log_config,
            "Attach request: added={}, rejected={}",
            report.added.len(),
            report.rejected.len()
        );
        if !report.added.is_empty() {
            let noun = if report.added.len() == 1 { "file" } else { "files" };
            self.set_message(format!("Attached {} {}", report.added.len(), noun));
        } else if !report.rejected.is_empty() {
            self.set_error("No files attached");
        }
    }

    pub fn remove_last_media(&mut self) {
        if let Some(view) = &mut self.composer {
            if let Some(id) = view.session.draft().media.last().map(|m| m.id.clone()) {
                view.session.remove_media(&id);
                view.attach_errors.clear();
            }
        }
    }

    /// Validate the link input and start loading its preview
    pub fn submit_link(&mut self) {
        let Some(view) = &mut self.composer else {
            return;
        };
        match view.links.submit(Instant::now()) {
            Ok(()) => log_attachment!(self.log_config, "Link preview pending"),
            Err(err) => {
                log_attachment!(self.log_config, "Link rejected: {}", err);
                self.set_error(err.to_string());
            }
        }
    }

    pub fn remove_last_link(&mut self) {
        if let Some(view) = &mut self.composer {
            if let Some(id) = view.session.draft().links.last().map(|l| l.id.clone()) {
                view.session.remove_link(&id);
            }
        }
    }

    fn apply_composer_styling(&self, textarea: &mut TextArea) {
        let theme = self.theme();
        textarea.set_style(Style::default().fg(theme.text));
        textarea.set_cursor_style(Style::default().fg(theme.background).bg(theme.primary));
        textarea.set_cursor_line_style(Style::default());
    }

    // ============================================================================
    // FEED
    // ============================================================================

    pub fn visible_posts(&self) -> Vec<&FeedPost> {
        self.feed.ordered(self.feed_tab)
    }

    pub fn selected_post(&self) -> Option<&FeedPost> {
        let index = self.list_state.selected()?;
        self.visible_posts().get(index).copied()
    }

    fn select_post(&mut self, id: uuid::Uuid) {
        let position = self.visible_posts().iter().position(|p| p.id == id);
        self.list_state.select(position.or(Some(0)));
    }

    /// Move down the feed; from the trigger this lands on the first post
    pub fn next_post(&mut self) {
        let len = self.feed.posts().len();
        if len == 0 {
            return;
        }
        if self.trigger_focused {
            self.trigger_focused = false;
            self.list_state.select(Some(0));
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Move up the feed; above the first post focus moves to the trigger
    pub fn previous_post(&mut self) {
        match self.list_state.selected() {
            Some(i) if i > 0 && !self.trigger_focused => self.list_state.select(Some(i - 1)),
            _ => self.trigger_focused = true,
        }
    }

    pub fn toggle_selected_comments(&mut self) {
        let Some(id) = self.selected_post().map(|p| p.id) else {
            return;
        };
        if !self.expanded_posts.remove(&id) {
            self.expanded_posts.insert(id);
        }
    }

    /// Open the reply box under the selected post and expand its comments
    pub fn start_reply(&mut self) {
        let Some(id) = self.selected_post().map(|p| p.id) else {
            return;
        };
        self.expanded_posts.insert(id);
        self.reply = Some(ReplyDraft { post_id: id, text: String::new() });
    }

    pub fn cancel_reply(&mut self) {
        self.reply = None;
    }

    /// Post the reply as a comment and clear the input. Blank replies
    /// are ignored and the box stays open.
    pub fn submit_reply(&mut self) {
        let Some(reply) = &mut self.reply else {
            return;
        };
        if self.feed.add_comment(reply.post_id, &reply.text).is_none() {
            return;
        }
        log_collaborator!(self.log_config, "Reply added to post {}", reply.post_id);
        reply.text.clear();
        self.set_message("Reply posted");
    }

    pub fn set_feed_tab(&mut self, tab: FeedTab) {
        self.feed_tab = tab;
        self.trigger_focused = false;
        let selected = (!self.feed.posts().is_empty()).then_some(0);
        self.list_state.select(selected);
    }

    pub fn next_nav(&mut self) {
        self.nav = self.nav.next();
    }

    pub fn previous_nav(&mut self) {
        self.nav = self.nav.previous();
    }

    pub fn cycle_color_scheme(&mut self) {
        self.settings.ui.color_scheme = self.settings.ui.color_scheme.next();
        self.set_message(format!("Theme: {}", self.settings.ui.color_scheme.as_str()));
    }

    pub fn dismiss_welcome(&mut self) {
        self.welcome = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default(), Fixtures::default(), LogConfig::disabled())
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
