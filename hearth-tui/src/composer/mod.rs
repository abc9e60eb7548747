// Post composer: draft state machine plus its attachment collaborators
pub mod handler;
pub mod link;
pub mod media;
pub mod session;

pub use handler::{ComposerHandler, LoggingHandler};
pub use link::{HostPreviewProvider, LinkEmbedder, LinkError, LinkPreviewProvider};
pub use media::{AttachError, AttachReport, MediaPolicy, MediaUploader};
pub use session::{word_count, ComposerSession};
