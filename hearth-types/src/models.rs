use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use uuid::Uuid;

use crate::enums::MediaKind;

// Timestamps travel as RFC3339 strings in fixture files
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// Attached image or video referenced by a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: String,
    pub kind: MediaKind,
    pub source_uri: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Embedded link with optional preview metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
}

/// In-memory post being composed.
///
/// Tags keep insertion order and never hold the same string twice. Word count
/// is not stored; it is derived from `content` whenever it is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub links: Vec<LinkRef>,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.content.is_empty()
            && self.tags.is_empty()
            && self.media.is_empty()
            && self.links.is_empty()
    }

    /// Freeze the current field values for a collaborator
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot(self.clone())
    }
}

/// Read-only copy of a draft handed to save/publish collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftSnapshot(Draft);

impl DraftSnapshot {
    pub fn into_inner(self) -> Draft {
        self.0
    }
}

impl Deref for DraftSnapshot {
    type Target = Draft;

    fn deref(&self) -> &Draft {
        &self.0
    }
}

/// Display identity of a post or comment author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub username: String,
}

impl Author {
    /// Handle shown next to the display name, always `@`-prefixed
    pub fn handle(&self) -> String {
        if self.username.starts_with('@') {
            self.username.clone()
        } else {
            format!("@{}", self.username)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(default)]
    pub comments: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: Author,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    pub text: String,
    #[serde(default)]
    pub reactions: Reactions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub author: Author,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reactions: Reactions,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub links: Vec<LinkRef>,
}

impl FeedPost {
    /// Build a feed entry from a published draft
    pub fn from_snapshot(snapshot: &DraftSnapshot, author: Author, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            created_at,
            title: snapshot.title.clone(),
            content: snapshot.content.clone(),
            tags: snapshot.tags.clone(),
            reactions: Reactions::default(),
            comments: Vec::new(),
            media: snapshot.media.clone(),
            links: snapshot.links.clone(),
        }
    }

    /// Editable fields of the post, used to reopen it in the composer
    pub fn to_draft(&self) -> Draft {
        Draft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            media: self.media.clone(),
            links: self.links.clone(),
        }
    }

    /// Replace the editable fields, keeping id, author, date and reactions
    pub fn apply_edit(&mut self, draft: &Draft) {
        self.title = draft.title.clone();
        self.content = draft.content.clone();
        self.tags = draft.tags.clone();
        self.media = draft.media.clone();
        self.links = draft.links.clone();
    }

    /// Comment with the most likes, shown under the post in the feed
    pub fn best_comment(&self) -> Option<&Comment> {
        self.comments.iter().max_by_key(|c| c.reactions.likes)
    }
}

/// Profile summary driving the completion banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub author: Author,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub completed_steps: u32,
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,
}

fn default_total_steps() -> u32 {
    5
}

impl Profile {
    pub fn completion_percent(&self) -> u32 {
        if self.total_steps == 0 {
            return 100;
        }
        let done = u64::from(self.completed_steps.min(self.total_steps));
        (done * 100 / u64::from(self.total_steps)) as u32
    }

    pub fn is_complete(&self) -> bool {
        self.completed_steps >= self.total_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_a_frozen_copy() {
        let mut draft = Draft {
            title: "Remote work".to_string(),
            content: "tips".to_string(),
            ..Default::default()
        };
        let snapshot = draft.snapshot();
        draft.title.push_str(" (edited)");

        assert_eq!(snapshot.title, "Remote work");
        assert_eq!(snapshot.into_inner().content, "tips");
    }

    #[test]
    fn test_author_handle_prefix() {
        let plain = Author { name: "Olivia".into(), username: "OliviaM".into() };
        let prefixed = Author { name: "Olivia".into(), username: "@OliviaM".into() };
        assert_eq!(plain.handle(), "@OliviaM");
        assert_eq!(prefixed.handle(), "@OliviaM");
    }

    #[test]
    fn test_feed_post_parses_rfc3339() {
        let json = r#"{
            "id": "6f1c1d2e-8f0a-4a55-9b8e-0c1a2b3c4d5e",
            "author": {"name": "Olivia Martin", "username": "OliviaM"},
            "created_at": "2026-10-16T09:00:00Z",
            "title": "How to optimize remote work?",
            "tags": ["Career"],
            "reactions": {"likes": 12600, "dislikes": 24, "comments": 1000}
        }"#;
        let post: FeedPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.reactions.likes, 12600);
        assert!(post.comments.is_empty());
        assert_eq!(post.created_at.to_rfc3339(), "2026-10-16T09:00:00+00:00");
    }

    #[test]
    fn test_best_comment_picks_most_liked() {
        let author = Author { name: "A".into(), username: "a".into() };
        let comment = |text: &str, likes| Comment {
            id: Uuid::new_v4(),
            author: author.clone(),
            created_at: Utc::now(),
            text: text.to_string(),
            reactions: Reactions { likes, ..Default::default() },
        };
        let mut post = FeedPost::from_snapshot(&Draft::default().snapshot(), author.clone(), Utc::now());
        assert!(post.best_comment().is_none());

        post.comments = vec![comment("meh", 1), comment("great", 12), comment("ok", 4)];
        assert_eq!(post.best_comment().unwrap().text, "great");
    }

    #[test]
    fn test_profile_completion_percent() {
        let author = Author { name: "A".into(), username: "a".into() };
        let profile = Profile { author, bio: None, completed_steps: 2, total_steps: 5 };
        assert_eq!(profile.completion_percent(), 40);
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_completion_with_huge_step_counts() {
        let author = Author { name: "A".into(), username: "a".into() };
        let profile = Profile {
            author,
            bio: None,
            completed_steps: u32::MAX / 2,
            total_steps: u32::MAX,
        };
        assert_eq!(profile.completion_percent(), 49);
    }

    #[test]
    fn test_to_draft_copies_editable_fields() {
        let post = FeedPost {
            id: Uuid::new_v4(),
            author: Author { name: "A".into(), username: "a".into() },
            created_at: Utc::now(),
            title: "Title".into(),
            content: "Body\n".into(),
            tags: vec!["AI".into()],
            reactions: Reactions { likes: 3, dislikes: 0, comments: 0 },
            comments: Vec::new(),
            media: Vec::new(),
            links: Vec::new(),
        };
        let draft = post.to_draft();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.content, "Body\n");
        assert_eq!(draft.tags, vec!["AI"]);
    }
}
