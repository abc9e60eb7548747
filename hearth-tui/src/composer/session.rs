use hearth_types::{ComposerTab, Draft, FormatStyle, LinkRef, MediaRef};
use std::path::{Path, PathBuf};

use super::handler::ComposerHandler;
use super::media::{AttachError, AttachReport, MediaPolicy, MediaUploader};

/// Count whitespace-delimited, non-empty tokens
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Draft state owned by an open composer modal.
///
/// The session exists only while the modal is open: the parent keeps it in an
/// `Option` and the terminal transitions (`save_draft`, `publish`, `cancel`,
/// `close`) consume it, so the open flag is cleared by construction. Dropping
/// the session releases every media preview handle it opened.
pub struct ComposerSession {
    draft: Draft,
    initial: Draft,
    tab: ComposerTab,
    uploader: MediaUploader,
}

impl ComposerSession {
    /// Open with a fresh draft, or populated exactly from `initial`
    pub fn open(initial: Option<Draft>, policy: MediaPolicy) -> Self {
        let initial = initial.unwrap_or_default();
        log::debug!(
            target: "composer",
            "Composer opened: title_len={}, tags={}, media={}, links={}",
            initial.title.len(),
            initial.tags.len(),
            initial.media.len(),
            initial.links.len()
        );
        Self {
            draft: initial.clone(),
            initial,
            tab: ComposerTab::Edit,
            uploader: MediaUploader::new(policy),
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn tab(&self) -> ComposerTab {
        self.tab
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.draft.content)
    }

    pub fn policy(&self) -> &MediaPolicy {
        self.uploader.policy()
    }

    pub fn uploader(&self) -> &MediaUploader {
        &self.uploader
    }

    /// True when the draft no longer matches what the modal opened with
    pub fn is_dirty(&self) -> bool {
        self.draft != self.initial
    }

    pub fn update_title(&mut self, text: impl Into<String>) {
        self.draft.title = text.into();
    }

    pub fn update_content(&mut self, text: impl Into<String>) {
        self.draft.content = text.into();
    }

    /// Append a formatting template to the end of the content
    pub fn apply_format(&mut self, style: FormatStyle) {
        self.draft.content.push_str(style.template());
    }

    /// Append a trimmed tag; blank or already-present tags are ignored.
    /// Returns whether the tag list changed.
    pub fn add_tag(&mut self, text: &str) -> bool {
        let tag = text.trim();
        if tag.is_empty() || self.draft.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.draft.tags.push(tag.to_string());
        true
    }

    /// Remove the first exact match; absent tags leave the list unchanged
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        match self.draft.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.draft.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_media(&mut self, media: MediaRef) {
        self.draft.media.push(media);
    }

    /// Drop every media item with `id` and release its preview handle
    pub fn remove_media(&mut self, id: &str) {
        self.draft.media.retain(|m| m.id != id);
        self.uploader.release(id);
    }

    /// Replace a media caption; a blank caption clears it
    pub fn set_media_caption(&mut self, id: &str, caption: &str) -> bool {
        let caption = caption.trim();
        match self.draft.media.iter_mut().find(|m| m.id == id) {
            Some(media) => {
                media.caption = (!caption.is_empty()).then(|| caption.to_string());
                true
            }
            None => false,
        }
    }

    /// Run a local file through the uploader and attach it on acceptance
    pub fn attach_file(&mut self, path: &Path) -> Result<MediaRef, AttachError> {
        let media = self.uploader.attach(path, self.draft.media.len())?;
        self.draft.media.push(media.clone());
        Ok(media)
    }

    /// Attach several files in order, reporting each rejection
    pub fn attach_files(&mut self, paths: &[PathBuf]) -> AttachReport {
        let report = self.uploader.attach_many(paths, self.draft.media.len());
        self.draft.media.extend(report.added.iter().cloned());
        report
    }

    pub fn add_link(&mut self, link: LinkRef) {
        self.draft.links.push(link);
    }

    pub fn remove_link(&mut self, id: &str) {
        self.draft.links.retain(|l| l.id != id);
    }

    pub fn switch_tab(&mut self, tab: ComposerTab) {
        self.tab = tab;
    }

    /// Hand a snapshot to the draft collaborator, then close
    pub fn save_draft(self, handler: &mut dyn ComposerHandler) {
        let snapshot = self.draft.snapshot();
        log::info!(target: "composer", "Saving draft: words={}", word_count(&snapshot.content));
        handler.on_save_draft(&snapshot);
        handler.on_close();
    }

    /// Hand a snapshot to the publish collaborator, then close
    pub fn publish(self, handler: &mut dyn ComposerHandler) {
        let snapshot = self.draft.snapshot();
        log::info!(target: "composer", "Publishing post: words={}", word_count(&snapshot.content));
        handler.on_publish(&snapshot);
        handler.on_close();
    }

    /// Discard the draft without notifying any save/publish collaborator
    pub fn cancel(self, handler: &mut dyn ComposerHandler) {
        log::debug!(target: "composer", "Composer cancelled, dirty={}", self.is_dirty());
        handler.on_cancel();
    }

    pub fn close(self, handler: &mut dyn ComposerHandler) {
        log::debug!(target: "composer", "Composer closed, dirty={}", self.is_dirty());
        handler.on_close();
    }
}
