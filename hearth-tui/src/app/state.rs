use hearth_types::{ComposerField, ComposerTab, FeedTab, NavSection};
use ratatui::widgets::ListState;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tui_textarea::TextArea;
use uuid::Uuid;

use crate::composer::{ComposerSession, LinkEmbedder};
use crate::feed::FeedStore;
use crate::fixtures::WelcomeBanner;
use crate::logging::LogConfig;
use crate::settings::Settings;
use hearth_types::Profile;

/// How long a status message stays in the footer
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
    pub shown_at: Instant,
}

/// Open composer modal: the draft session plus the widgets that edit it
pub struct ComposerView {
    pub session: ComposerSession,
    pub focus: ComposerField,
    pub title_input: String,
    pub content: TextArea<'static>,
    pub tag_input: String,
    pub media_input: String,
    pub links: LinkEmbedder,
    /// Rejection reasons from the most recent attach attempt
    pub attach_errors: Vec<String>,
    pub preview_scroll: u16,
}

impl ComposerView {
    pub fn new(session: ComposerSession, links: LinkEmbedder) -> Self {
        let draft = session.draft();
        let title_input = draft.title.clone();
        let content = TextArea::new(editor_lines(&draft.content));
        let mut view = Self {
            session,
            focus: ComposerField::default(),
            title_input,
            content,
            tag_input: String::new(),
            media_input: String::new(),
            links,
            attach_errors: Vec::new(),
            preview_scroll: 0,
        };
        view.content.set_hard_tab_indent(true);
        view.content.move_cursor(tui_textarea::CursorMove::Bottom);
        view.content.move_cursor(tui_textarea::CursorMove::End);
        view
    }

    pub fn tab(&self) -> ComposerTab {
        self.session.tab()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Push the editor's text into the draft
    pub fn sync_content(&mut self) {
        self.session.update_content(self.content.lines().join("\n"));
    }

    /// Rebuild the editor from the draft after a programmatic edit
    pub fn reload_content(&mut self) {
        let style = self.content.style();
        let cursor_style = self.content.cursor_style();
        self.content = TextArea::new(editor_lines(&self.session.draft().content));
        self.content.set_style(style);
        self.content.set_cursor_style(cursor_style);
        self.content.set_hard_tab_indent(true);
        self.content.move_cursor(tui_textarea::CursorMove::Bottom);
        self.content.move_cursor(tui_textarea::CursorMove::End);
    }
}

/// Split on every newline so a trailing "\n" survives the round trip
/// through `TextArea::lines().join("\n")`
fn editor_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

/// Inline reply box under an expanded post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub post_id: Uuid,
    pub text: String,
}

/// Main application state
pub struct App {
    pub running: bool,
    pub feed: FeedStore,
    pub list_state: ListState,
    pub feed_tab: FeedTab,
    pub nav: NavSection,
    /// `Some` while the composer modal is open
    pub composer: Option<ComposerView>,
    /// `Some` while the reply box is open
    pub reply: Option<ReplyDraft>,
    pub trigger_focused: bool,
    pub show_help: bool,
    pub show_discard_confirmation: bool,
    pub welcome: Option<WelcomeBanner>,
    pub profile: Option<Profile>,
    pub expanded_posts: HashSet<Uuid>,
    pub message: Option<StatusMessage>,
    pub settings: Settings,
    pub log_config: LogConfig,
}
