use hearth::composer::{
    AttachError, ComposerHandler, ComposerSession, HostPreviewProvider, LinkEmbedder, MediaPolicy,
};
use hearth::feed::FeedStore;
use hearth::settings::Settings;
use hearth_types::{Author, ComposerTab, Draft, DraftSnapshot, FeedTab};
use std::fs::File;
use std::io::Write;
use std::time::{Duration, Instant};

/// Collaborator that records what it was handed, like an embedding app would
#[derive(Default)]
struct Recorder {
    saved: Vec<Draft>,
    published: Vec<Draft>,
    closes: usize,
    cancels: usize,
}

impl ComposerHandler for Recorder {
    fn on_save_draft(&mut self, draft: &DraftSnapshot) {
        self.saved.push(draft.clone().into_inner());
    }

    fn on_publish(&mut self, draft: &DraftSnapshot) {
        self.published.push(draft.clone().into_inner());
    }

    fn on_close(&mut self) {
        self.closes += 1;
    }

    fn on_cancel(&mut self) {
        self.cancels += 1;
    }
}

fn author() -> Author {
    Author {
        name: "Olivia Martin".to_string(),
        username: "OliviaM".to_string(),
    }
}

#[test]
fn test_full_compose_and_publish_flow() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("desk.jpg");
    File::create(&image).unwrap().write_all(b"jpeg bytes").unwrap();

    // Step 1: open an empty composer
    let mut session = ComposerSession::open(None, MediaPolicy::default());
    assert!(session.draft().is_empty());

    // Step 2: fill every field
    session.update_title("How to optimize remote work?");
    session.update_content("Share your best tips\nfor staying focused");
    session.add_tag("Career");
    session.add_tag("Remote Work");
    let media = session.attach_file(&image).unwrap();
    session.set_media_caption(&media.id, "My desk");
    assert_eq!(session.uploader().live_handles(), 1);
    assert_eq!(session.uploader().file_size(&media.id), Some(10));

    // Step 3: embed a link once its preview resolves
    let mut links = LinkEmbedder::new(Duration::from_millis(1000));
    links.set_input("https://example.com/remote");
    let submitted_at = Instant::now();
    links.submit(submitted_at).unwrap();
    assert!(links.poll(submitted_at, &HostPreviewProvider).is_none());
    let link = links
        .poll(submitted_at + Duration::from_millis(1000), &HostPreviewProvider)
        .unwrap();
    session.add_link(link);

    // Step 4: preview and back leaves the draft alone
    let before = session.draft().clone();
    session.switch_tab(ComposerTab::Preview);
    session.switch_tab(ComposerTab::Edit);
    assert_eq!(session.draft(), &before);
    assert_eq!(session.word_count(), 7);

    // Step 5: publish into the feed
    let mut feed = FeedStore::new(Vec::new(), author());
    session.publish(&mut feed);

    let post = &feed.posts()[0];
    assert_eq!(post.title, "How to optimize remote work?");
    assert_eq!(post.tags, vec!["Career", "Remote Work"]);
    assert_eq!(post.media[0].caption.as_deref(), Some("My desk"));
    assert_eq!(post.links[0].url, "https://example.com/remote");
    assert_eq!(post.author, author());
    assert_eq!(feed.ordered(FeedTab::Latest).len(), 1);
}

#[test]
fn test_collaborators_receive_snapshots() {
    let mut recorder = Recorder::default();

    let mut session = ComposerSession::open(None, MediaPolicy::default());
    session.update_content("save me");
    session.save_draft(&mut recorder);

    let reopened = recorder.saved.last().cloned();
    let mut session = ComposerSession::open(reopened, MediaPolicy::default());
    assert_eq!(session.draft().content, "save me");
    session.update_title("Now public");
    session.publish(&mut recorder);

    ComposerSession::open(None, MediaPolicy::default()).cancel(&mut recorder);

    assert_eq!(recorder.saved.len(), 1);
    assert_eq!(recorder.published.len(), 1);
    assert_eq!(recorder.published[0].title, "Now public");
    assert_eq!(recorder.published[0].content, "save me");
    assert_eq!(recorder.closes, 2);
    assert_eq!(recorder.cancels, 1);
}

#[test]
fn test_attachment_limit_and_type_rules() {
    let dir = tempfile::tempdir().unwrap();
    let policy = MediaPolicy {
        accepted_types: vec!["image/png".to_string()],
        max_attachments: 1,
    };
    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");
    let clip = dir.path().join("c.mp4");
    for path in [&first, &second, &clip] {
        File::create(path).unwrap();
    }

    let mut session = ComposerSession::open(None, policy);
    let report = session.attach_files(&[clip.clone(), first.clone(), second.clone()]);

    assert_eq!(report.added.len(), 1);
    assert_eq!(report.rejected.len(), 2);
    assert!(matches!(report.rejected[0].1, AttachError::UnsupportedType { .. }));
    assert!(matches!(report.rejected[1].1, AttachError::LimitReached { max: 1 }));
    assert_eq!(session.draft().media.len(), 1);

    let missing = session.attach_file(&dir.path().join("gone.png"));
    assert!(matches!(missing, Err(AttachError::LimitReached { .. })));
}

#[test]
fn test_settings_drive_the_media_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hearth.toml");
    std::fs::write(
        &path,
        "[composer]\naccepted_media_types = [\"image/gif\"]\nmax_attachments = 2\n",
    )
    .unwrap();

    let settings = Settings::build(&[(path, true)], &[]).unwrap();
    let policy = settings.media_policy();
    assert_eq!(policy.max_attachments, 2);
    assert!(policy.accepts("image/gif"));
    assert!(!policy.accepts("image/png"));
}
