use chrono::Utc;
use hearth_types::{Author, Comment, Draft, DraftSnapshot, FeedPost, FeedTab, Reactions};
use std::cmp::Reverse;
use uuid::Uuid;

use crate::composer::{ComposerHandler, LoggingHandler};

/// Posts shown in the feed plus drafts saved this session.
///
/// Acts as the composer's collaborator: published drafts become the newest
/// post, saved drafts are kept for reopening. While an edit is in progress
/// a publish replaces the edited post in place instead.
pub struct FeedStore {
    posts: Vec<FeedPost>,
    drafts: Vec<Draft>,
    author: Author,
    editing: Option<Uuid>,
}

impl FeedStore {
    pub fn new(posts: Vec<FeedPost>, author: Author) -> Self {
        Self {
            posts,
            drafts: Vec::new(),
            author,
            editing: None,
        }
    }

    pub fn post(&self, id: Uuid) -> Option<&FeedPost> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Route the next publish to post `id`. Returns its editable fields,
    /// or `None` when no such post exists.
    pub fn begin_edit(&mut self, id: Uuid) -> Option<Draft> {
        let draft = self.post(id)?.to_draft();
        self.editing = Some(id);
        Some(draft)
    }

    /// Post currently open for editing
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Append a comment by the local author. Blank text is ignored.
    pub fn add_comment(&mut self, post_id: Uuid, text: &str) -> Option<&Comment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let author = self.author.clone();
        let post = self.posts.iter_mut().find(|p| p.id == post_id)?;
        post.comments.push(Comment {
            id: Uuid::new_v4(),
            author,
            created_at: Utc::now(),
            text: text.to_string(),
            reactions: Reactions::default(),
        });
        post.reactions.comments += 1;
        log::debug!(target: "collaborator", "Comment added to post {}", post_id);
        post.comments.last()
    }

    pub fn posts(&self) -> &[FeedPost] {
        &self.posts
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn latest_draft(&self) -> Option<&Draft> {
        self.drafts.last()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Indices into `posts` in the order `tab` displays them
    pub fn ordered_indices(&self, tab: FeedTab) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.posts.len()).collect();
        let posts = &self.posts;
        match tab {
            FeedTab::All => {}
            FeedTab::Latest => indices.sort_by_key(|&i| Reverse(posts[i].created_at)),
            FeedTab::Popular => indices.sort_by_key(|&i| Reverse(posts[i].reactions.likes)),
            FeedTab::Topics => indices.sort_by(|&a, &b| {
                match (posts[a].tags.first(), posts[b].tags.first()) {
                    (Some(x), Some(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            }),
        }
        indices
    }

    pub fn ordered(&self, tab: FeedTab) -> Vec<&FeedPost> {
        self.ordered_indices(tab).into_iter().map(|i| &self.posts[i]).collect()
    }
}

impl ComposerHandler for FeedStore {
    fn on_save_draft(&mut self, draft: &DraftSnapshot) {
        LoggingHandler.on_save_draft(draft);
        self.drafts.push(Draft::clone(draft));
    }

    fn on_publish(&mut self, draft: &DraftSnapshot) {
        LoggingHandler.on_publish(draft);
        if let Some(id) = self.editing.take() {
            if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
                log::debug!(target: "collaborator", "Replacing post {} in place", id);
                post.apply_edit(draft);
                return;
            }
        }
        let post = FeedPost::from_snapshot(draft, self.author.clone(), Utc::now());
        log::debug!(target: "collaborator", "Prepending post {} to the feed", post.id);
        self.posts.insert(0, post);
    }

    fn on_close(&mut self) {
        LoggingHandler.on_close();
        self.editing = None;
    }

    fn on_cancel(&mut self) {
        LoggingHandler.on_cancel();
        self.editing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Fixtures, SAMPLE_FIXTURES};

    fn store() -> FeedStore {
        let fixtures = Fixtures::from_json(SAMPLE_FIXTURES).unwrap();
        FeedStore::new(
            fixtures.posts,
            Author {
                name: "Jordan Lee".to_string(),
                username: "jordan".to_string(),
            },
        )
    }

    fn titles(store: &FeedStore, tab: FeedTab) -> Vec<String> {
        store.ordered(tab).iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_all_keeps_fixture_order() {
        let store = store();
        assert_eq!(store.ordered_indices(FeedTab::All), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_latest_sorts_newest_first() {
        let store = store();
        assert_eq!(
            titles(&store, FeedTab::Latest),
            vec![
                "Workflow automation wins",
                "How to optimize remote work?",
                "Which AI tools actually saved you time this year?",
                "Personal training on a budget",
            ]
        );
    }

    #[test]
    fn test_popular_sorts_by_likes() {
        let store = store();
        let likes: Vec<u64> = store.ordered(FeedTab::Popular).iter().map(|p| p.reactions.likes).collect();
        assert_eq!(likes, vec![12600, 1000, 842, 18]);
    }

    #[test]
    fn test_topics_groups_by_first_tag_untagged_last() {
        let store = store();
        let first_tags: Vec<Option<String>> = store
            .ordered(FeedTab::Topics)
            .iter()
            .map(|p| p.tags.first().cloned())
            .collect();
        assert_eq!(
            first_tags,
            vec![
                Some("Artificial Intelligence".to_string()),
                Some("Career".to_string()),
                Some("Personal Training".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_publish_prepends_post_by_local_author() {
        let mut store = store();
        let draft = Draft {
            title: "Fresh".to_string(),
            content: "new post".to_string(),
            tags: vec!["AI".to_string()],
            ..Default::default()
        };
        store.on_publish(&draft.snapshot());

        assert_eq!(store.posts().len(), 5);
        let post = &store.posts()[0];
        assert_eq!(post.title, "Fresh");
        assert_eq!(post.tags, vec!["AI"]);
        assert_eq!(post.author.username, "jordan");
        assert_eq!(post.reactions.likes, 0);
    }

    #[test]
    fn test_save_draft_keeps_latest() {
        let mut store = store();
        assert!(store.latest_draft().is_none());
        let first = Draft { title: "one".into(), ..Default::default() };
        let second = Draft { title: "two".into(), ..Default::default() };
        store.on_save_draft(&first.snapshot());
        store.on_save_draft(&second.snapshot());
        assert_eq!(store.drafts().len(), 2);
        assert_eq!(store.latest_draft(), Some(&second));
        assert_eq!(store.posts().len(), 4);
    }

    #[test]
    fn test_publish_while_editing_replaces_post() {
        let mut store = store();
        let original = store.posts()[1].clone();

        let mut draft = store.begin_edit(original.id).unwrap();
        assert_eq!(draft.title, original.title);
        draft.title = "Edited title".to_string();
        draft.tags = vec!["Career".to_string()];
        store.on_publish(&draft.snapshot());
        store.on_close();

        assert_eq!(store.posts().len(), 4);
        let edited = store.post(original.id).unwrap();
        assert_eq!(edited.title, "Edited title");
        assert_eq!(edited.tags, vec!["Career"]);
        assert_eq!(edited.author, original.author);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.reactions, original.reactions);
        assert_eq!(edited.comments, original.comments);
        assert!(store.editing().is_none());
    }

    #[test]
    fn test_cancelled_edit_does_not_redirect_next_publish() {
        let mut store = store();
        let id = store.posts()[0].id;
        store.begin_edit(id).unwrap();
        store.on_cancel();

        let draft = Draft { title: "Brand new".into(), ..Default::default() };
        store.on_publish(&draft.snapshot());

        assert_eq!(store.posts().len(), 5);
        assert_eq!(store.posts()[0].title, "Brand new");
        assert_ne!(store.post(id).unwrap().title, "Brand new");
    }

    #[test]
    fn test_begin_edit_unknown_post() {
        let mut store = store();
        assert!(store.begin_edit(Uuid::new_v4()).is_none());
        assert!(store.editing().is_none());
    }

    #[test]
    fn test_add_comment_appends_and_counts() {
        let mut store = store();
        let id = store.posts()[2].id;
        let before = store.post(id).unwrap().reactions.comments;
        let count = store.post(id).unwrap().comments.len();

        let comment = store.add_comment(id, "  Great read  ").unwrap();
        assert_eq!(comment.text, "Great read");
        assert_eq!(comment.author.username, "jordan");

        let post = store.post(id).unwrap();
        assert_eq!(post.comments.len(), count + 1);
        assert_eq!(post.reactions.comments, before + 1);

        assert!(store.add_comment(id, "   ").is_none());
        assert_eq!(store.post(id).unwrap().comments.len(), count + 1);
    }
}
