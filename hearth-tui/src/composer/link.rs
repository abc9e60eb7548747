use hearth_types::LinkRef;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// `scheme://authority[path]`; the authority may carry userinfo and a port
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://(?:[^\s/?#@]+@)?(?P<host>[^\s/?#:@]+)(?::\d{1,5})?(?:[/?#]\S*)?$")
        .expect("Failed to compile URL regex")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Please enter a URL")]
    Empty,

    #[error("Please enter a valid URL")]
    Invalid,
}

pub fn validate_url(input: &str) -> Result<(), LinkError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(LinkError::Empty);
    }
    if !URL_REGEX.is_match(url) {
        return Err(LinkError::Invalid);
    }
    Ok(())
}

/// Host component of a URL that passed validation
pub fn url_host(url: &str) -> Option<&str> {
    URL_REGEX
        .captures(url.trim())
        .and_then(|caps| caps.name("host"))
        .map(|m| m.as_str())
}

/// Source of link preview metadata
pub trait LinkPreviewProvider {
    fn preview(&self, url: &str) -> LinkRef;
}

/// Offline provider: titles a link with its host name
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPreviewProvider;

impl LinkPreviewProvider for HostPreviewProvider {
    fn preview(&self, url: &str) -> LinkRef {
        let title = url_host(url).map(|host| host.trim_start_matches("www.").to_string());
        LinkRef {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            title,
            description: None,
            thumbnail_uri: None,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingLink {
    url: String,
    ready_at: Instant,
}

/// URL input with inline validation and a simulated preview fetch
#[derive(Debug)]
pub struct LinkEmbedder {
    input: String,
    error: Option<LinkError>,
    pending: Option<PendingLink>,
    delay: Duration,
}

impl LinkEmbedder {
    pub fn new(delay: Duration) -> Self {
        Self {
            input: String::new(),
            error: None,
            pending: None,
            delay,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&LinkError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Input is locked while a preview is loading
    pub fn push_char(&mut self, c: char) {
        if self.is_loading() {
            return;
        }
        self.input.push(c);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        if self.is_loading() {
            return;
        }
        self.input.pop();
        self.error = None;
    }

    pub fn set_input(&mut self, text: &str) {
        if self.is_loading() {
            return;
        }
        self.input = text.to_string();
        self.error = None;
    }

    /// Validate the input and start loading its preview.
    ///
    /// Errors are kept for inline display and never propagate further than
    /// the caller. A submit while loading is ignored.
    pub fn submit(&mut self, now: Instant) -> Result<(), LinkError> {
        if self.is_loading() {
            return Ok(());
        }
        if let Err(err) = validate_url(&self.input) {
            self.error = Some(err.clone());
            return Err(err);
        }
        self.error = None;
        self.pending = Some(PendingLink {
            url: self.input.trim().to_string(),
            ready_at: now + self.delay,
        });
        Ok(())
    }

    /// Resolve a pending preview once its delay has elapsed
    pub fn poll(&mut self, now: Instant, provider: &dyn LinkPreviewProvider) -> Option<LinkRef> {
        let ready = self.pending.as_ref().map(|p| now >= p.ready_at).unwrap_or(false);
        if !ready {
            return None;
        }
        let pending = self.pending.take()?;
        self.input.clear();
        Some(provider.preview(&pending.url))
    }
}
