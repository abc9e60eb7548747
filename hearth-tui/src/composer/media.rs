use hearth_types::{MediaKind, MediaRef};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// MIME types accepted when no configuration overrides them
pub const DEFAULT_ACCEPTED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "video/mp4",
    "video/quicktime",
];

pub const DEFAULT_MAX_ATTACHMENTS: usize = 5;

/// Attachment acceptance rules supplied by the embedding application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPolicy {
    pub accepted_types: Vec<String>,
    pub max_attachments: usize,
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self {
            accepted_types: DEFAULT_ACCEPTED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_attachments: DEFAULT_MAX_ATTACHMENTS,
        }
    }
}

impl MediaPolicy {
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_types.iter().any(|t| t.eq_ignore_ascii_case(mime))
    }

    /// Short list of accepted extensions for hint text, e.g. "jpeg, png, mp4"
    pub fn accepted_summary(&self) -> String {
        self.accepted_types
            .iter()
            .map(|t| t.split('/').nth(1).unwrap_or(t.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Error, Debug)]
pub enum AttachError {
    #[error("Unsupported file type: {mime}")]
    UnsupportedType { mime: String },

    #[error("Maximum of {max} attachments reached")]
    LimitReached { max: usize },

    #[error("Could not open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of attaching a batch of files
#[derive(Debug, Default)]
pub struct AttachReport {
    pub added: Vec<MediaRef>,
    pub rejected: Vec<(PathBuf, AttachError)>,
}

/// Guess a MIME type from the file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Open file kept alive while its media item is attached
struct PreviewHandle {
    file: File,
    file_name: String,
}

/// Turns local files into media references and owns their preview handles.
///
/// Each accepted file stays open until `release` is called for its id or the
/// uploader is dropped.
pub struct MediaUploader {
    policy: MediaPolicy,
    handles: HashMap<String, PreviewHandle>,
}

impl MediaUploader {
    pub fn new(policy: MediaPolicy) -> Self {
        Self {
            policy,
            handles: HashMap::new(),
        }
    }

    pub fn policy(&self) -> &MediaPolicy {
        &self.policy
    }

    /// Number of preview handles currently held open
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn file_name(&self, id: &str) -> Option<&str> {
        self.handles.get(id).map(|h| h.file_name.as_str())
    }

    /// Size in bytes of an attached file, read from its open handle
    pub fn file_size(&self, id: &str) -> Option<u64> {
        self.handles
            .get(id)
            .and_then(|h| h.file.metadata().ok())
            .map(|m| m.len())
    }

    /// Accept one file given how many items the draft already holds
    pub fn attach(&mut self, path: &Path, attached: usize) -> Result<MediaRef, AttachError> {
        if attached >= self.policy.max_attachments {
            return Err(AttachError::LimitReached {
                max: self.policy.max_attachments,
            });
        }

        let mime = mime_for_path(path);
        if !self.policy.accepts(mime) {
            return Err(AttachError::UnsupportedType {
                mime: mime.to_string(),
            });
        }

        let io_err = |source| AttachError::Io {
            path: path.to_path_buf(),
            source,
        };
        let absolute = std::fs::canonicalize(path).map_err(io_err)?;
        let file = File::open(&absolute).map_err(io_err)?;

        let id = Uuid::new_v4().to_string();
        let file_name = absolute
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!(target: "attachments", "Opened preview handle {} for {}", id, absolute.display());
        self.handles.insert(id.clone(), PreviewHandle { file, file_name });

        Ok(MediaRef {
            id,
            kind: MediaKind::from_mime(mime),
            source_uri: format!("file://{}", absolute.display()),
            caption: None,
        })
    }

    /// Attach files in order; rejections are reported, never fatal
    pub fn attach_many(&mut self, paths: &[PathBuf], attached: usize) -> AttachReport {
        let mut report = AttachReport::default();
        for path in paths {
            match self.attach(path, attached + report.added.len()) {
                Ok(media) => report.added.push(media),
                Err(err) => {
                    log::warn!(target: "attachments", "Rejected {}: {}", path.display(), err);
                    report.rejected.push((path.clone(), err));
                }
            }
        }
        report
    }

    /// Close the handle for `id`; unknown ids are ignored
    pub fn release(&mut self, id: &str) {
        if self.handles.remove(id).is_some() {
            log::debug!(target: "attachments", "Released preview handle {}", id);
        }
    }
}

impl Drop for MediaUploader {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            log::debug!(target: "attachments", "Releasing {} preview handles", self.handles.len());
        }
        self.handles.clear();
    }
}
