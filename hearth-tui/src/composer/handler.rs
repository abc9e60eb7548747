use hearth_types::DraftSnapshot;

/// Collaborator notified by composer transitions.
///
/// Calls are fire-and-forget: the composer never inspects a result and does
/// not catch a panicking implementation.
pub trait ComposerHandler {
    fn on_save_draft(&mut self, draft: &DraftSnapshot);
    fn on_publish(&mut self, draft: &DraftSnapshot);
    fn on_close(&mut self);
    fn on_cancel(&mut self);
}

/// Handler that only writes each callback to the log
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl ComposerHandler for LoggingHandler {
    fn on_save_draft(&mut self, draft: &DraftSnapshot) {
        log::info!(
            target: "collaborator",
            "on_save_draft: title={:?}, tags={:?}, media={}, links={}",
            draft.title,
            draft.tags,
            draft.media.len(),
            draft.links.len()
        );
    }

    fn on_publish(&mut self, draft: &DraftSnapshot) {
        log::info!(
            target: "collaborator",
            "on_publish: title={:?}, tags={:?}, media={}, links={}",
            draft.title,
            draft.tags,
            draft.media.len(),
            draft.links.len()
        );
    }

    fn on_close(&mut self) {
        log::info!(target: "collaborator", "on_close");
    }

    fn on_cancel(&mut self) {
        log::info!(target: "collaborator", "on_cancel");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hearth_types::Draft;

    /// Records every callback for assertions
    #[derive(Debug, Default)]
    pub struct RecordingHandler {
        pub saved: Vec<Draft>,
        pub published: Vec<Draft>,
        pub events: Vec<&'static str>,
    }

    impl ComposerHandler for RecordingHandler {
        fn on_save_draft(&mut self, draft: &DraftSnapshot) {
            self.saved.push(Draft::clone(draft));
            self.events.push("save_draft");
        }

        fn on_publish(&mut self, draft: &DraftSnapshot) {
            self.published.push(Draft::clone(draft));
            self.events.push("publish");
        }

        fn on_close(&mut self) {
            self.events.push("close");
        }

        fn on_cancel(&mut self) {
            self.events.push("cancel");
        }
    }

    #[test]
    fn test_logging_handler_accepts_every_callback() {
        let mut handler = LoggingHandler;
        let snapshot = Draft::default().snapshot();
        handler.on_save_draft(&snapshot);
        handler.on_publish(&snapshot);
        handler.on_close();
        handler.on_cancel();
    }
}
