//! Tests for the comment store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::{CommentStore, POST_ERROR};
use crate::domain::ErrorCode;
use crate::domain::comment::{Comment, CommentDraft, NewComment};
use crate::domain::ports::{CommentGateway, CommentGatewayError, MockCommentGateway};
use crate::domain::user::Author;

fn author(name: &str) -> Author {
    Author {
        name: name.to_owned(),
        avatar: format!("https://i.pravatar.cc/150?u={name}"),
    }
}

fn top_level(content: &str, rating: Option<u8>) -> Comment {
    Comment::new(CommentDraft {
        id: Uuid::new_v4(),
        author: author("Marie Curie"),
        content: content.to_owned(),
        rating,
        parent_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 2, 10, 14, 30, 0).unwrap(),
        replies: Vec::new(),
    })
    .expect("valid comment draft")
}

/// Thread `[A, B]` where `A` already carries one reply.
fn seed_thread() -> Vec<Comment> {
    let a_id = Uuid::new_v4();
    let existing_reply = Comment::new(CommentDraft {
        id: Uuid::new_v4(),
        author: author("Formateur"),
        content: "Merci beaucoup Marie !".to_owned(),
        rating: None,
        parent_id: Some(a_id),
        created_at: Utc.with_ymd_and_hms(2026, 2, 10, 18, 0, 0).unwrap(),
        replies: Vec::new(),
    })
    .expect("valid reply draft");
    let a = Comment::new(CommentDraft {
        id: a_id,
        author: author("Marie Curie"),
        content: "Excellent cours !".to_owned(),
        rating: Some(5),
        parent_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 2, 10, 14, 30, 0).unwrap(),
        replies: vec![existing_reply],
    })
    .expect("valid comment draft");
    vec![a, top_level("Très bien structuré.", Some(4))]
}

fn stored_from(submission: &NewComment) -> Comment {
    Comment::new(CommentDraft {
        id: Uuid::new_v4(),
        author: author("Moi"),
        content: submission.content().to_owned(),
        rating: submission.rating(),
        parent_id: submission.parent_id(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        replies: Vec::new(),
    })
    .expect("valid stored comment")
}

fn loaded_store(thread: Vec<Comment>) -> (CommentStore<MockCommentGateway>, Vec<Comment>) {
    let mut gateway = MockCommentGateway::new();
    let served = thread.clone();
    gateway
        .expect_thread()
        .returning(move |_| Ok(served.clone()));
    gateway
        .expect_submit()
        .returning(|_, submission| Ok(stored_from(submission)));
    (CommentStore::new(Arc::new(gateway)), thread)
}

async fn fetched_store(thread: Vec<Comment>) -> (CommentStore<MockCommentGateway>, Vec<Comment>) {
    let (store, thread) = loaded_store(thread);
    store
        .fetch_comments("vuejs-3-masterclass")
        .await
        .expect("thread fetch succeeds");
    (store, thread)
}

#[tokio::test]
async fn fetch_replaces_the_thread_wholesale() {
    let (store, thread) = fetched_store(seed_thread()).await;
    assert_eq!(store.snapshot().comments, thread);
    assert!(!store.snapshot().loading);
}

#[tokio::test]
async fn fetch_failure_stores_a_localized_message() {
    let mut gateway = MockCommentGateway::new();
    gateway
        .expect_thread()
        .return_once(|_| Err(CommentGatewayError::connection("refused")));

    let store = CommentStore::new(Arc::new(gateway));
    store
        .fetch_comments("vuejs-3-masterclass")
        .await
        .expect_err("failure surfaces");
    let snapshot = store.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some(super::LOAD_ERROR));
    assert!(snapshot.comments.is_empty());
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn empty_rejection_body_still_yields_a_displayable_error() {
    let mut gateway = MockCommentGateway::new();
    gateway
        .expect_thread()
        .return_once(|_| Err(CommentGatewayError::rejected(500_u16, "")));

    let store = CommentStore::new(Arc::new(gateway));
    let error = store
        .fetch_comments("vuejs-3-masterclass")
        .await
        .expect_err("failure surfaces");

    assert!(!error.message().trim().is_empty());
    assert_eq!(store.snapshot().error.as_deref(), Some(super::LOAD_ERROR));
}

#[tokio::test]
async fn top_level_post_prepends_to_the_thread() {
    let (store, thread) = fetched_store(seed_thread()).await;
    let submission = NewComment::top_level("Est-ce que ce cours couvre la version 4 ?", None)
        .expect("valid submission");

    let stored = store
        .post_comment("vuejs-3-masterclass", &submission)
        .await
        .expect("post succeeds");

    let comments = store.snapshot().comments;
    assert_eq!(comments.len(), 3);
    assert_eq!(comments[0], stored);
    assert_eq!(&comments[1..], thread.as_slice());
    assert!(stored.replies().is_empty());
    assert!(!store.snapshot().submitting);
}

#[tokio::test]
async fn reply_appends_to_the_parent_thread() {
    let (store, thread) = fetched_store(seed_thread()).await;
    let parent = &thread[0];
    let submission =
        NewComment::reply("Ravi que le cours vous plaise !", parent.id()).expect("valid reply");

    let stored = store
        .post_comment("vuejs-3-masterclass", &submission)
        .await
        .expect("reply succeeds");

    let comments = store.snapshot().comments;
    // Oldest-first within the parent: the existing reply stays in front.
    let replies = comments[0].replies();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], parent.replies()[0]);
    assert_eq!(replies[1], stored);
    // Top-level ordering is untouched by a reply.
    assert_eq!(comments.len(), 2);
}

#[tokio::test]
async fn reply_to_unknown_parent_fails_without_mutating_the_thread() {
    let (store, thread) = fetched_store(seed_thread()).await;
    let submission =
        NewComment::reply("Réponse orpheline", Uuid::new_v4()).expect("valid reply");

    let error = store
        .post_comment("vuejs-3-masterclass", &submission)
        .await
        .expect_err("orphan reply is rejected");

    assert_eq!(error.code(), ErrorCode::ParentNotFound);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.comments, thread);
    assert!(!snapshot.submitting);
}

#[tokio::test]
async fn orphan_reply_never_reaches_the_gateway() {
    let mut gateway = MockCommentGateway::new();
    gateway.expect_thread().returning(|_| Ok(seed_thread()));
    // No expect_submit: a submission would panic the mock.
    let store = CommentStore::new(Arc::new(gateway));
    store
        .fetch_comments("vuejs-3-masterclass")
        .await
        .expect("thread fetch succeeds");

    let submission = NewComment::reply("Réponse orpheline", Uuid::new_v4()).expect("valid reply");
    store
        .post_comment("vuejs-3-masterclass", &submission)
        .await
        .expect_err("orphan reply is rejected");
}

#[tokio::test]
async fn failed_submission_leaves_the_thread_untouched() {
    let mut gateway = MockCommentGateway::new();
    gateway.expect_thread().returning(|_| Ok(seed_thread()));
    gateway
        .expect_submit()
        .return_once(|_, _| Err(CommentGatewayError::rejected(500_u16, "boom")));

    let store = CommentStore::new(Arc::new(gateway));
    store
        .fetch_comments("vuejs-3-masterclass")
        .await
        .expect("thread fetch succeeds");
    let before = store.snapshot().comments;

    let submission = NewComment::top_level("Perdu", None).expect("valid submission");
    let error = store
        .post_comment("vuejs-3-masterclass", &submission)
        .await
        .expect_err("submission fails");

    assert_eq!(error.message(), POST_ERROR);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.comments, before);
    assert!(!snapshot.submitting);
}

#[tokio::test]
async fn clear_comments_resets_the_thread() {
    let (store, _) = fetched_store(seed_thread()).await;
    store.clear_comments();
    let snapshot = store.snapshot();
    assert!(snapshot.comments.is_empty());
    assert!(snapshot.error.is_none());
}

/// Gateway whose first thread fetch stalls until released.
struct GatedGateway {
    gate: tokio::sync::Mutex<Option<oneshot::Receiver<()>>>,
    outcome: Result<Vec<Comment>, CommentGatewayError>,
    calls: AtomicU32,
}

#[async_trait]
impl CommentGateway for GatedGateway {
    async fn thread(&self, _course_slug: &str) -> Result<Vec<Comment>, CommentGatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.outcome.clone()
    }

    async fn submit(
        &self,
        _course_slug: &str,
        _comment: &NewComment,
    ) -> Result<Comment, CommentGatewayError> {
        Err(CommentGatewayError::rejected(501_u16, "unused"))
    }
}

#[tokio::test]
async fn late_fetch_cannot_resurrect_a_cleared_thread() {
    let (release, gate) = oneshot::channel();
    let gateway = Arc::new(GatedGateway {
        gate: tokio::sync::Mutex::new(Some(gate)),
        outcome: Ok(seed_thread()),
        calls: AtomicU32::new(0),
    });
    let store = Arc::new(CommentStore::new(Arc::clone(&gateway)));

    let slow = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.fetch_comments("vuejs-3-masterclass").await }
    });
    while gateway.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    // Navigating away clears the thread while the fetch is in flight.
    store.clear_comments();
    let _ = release.send(());
    slow.await
        .expect("task completes")
        .expect("stalled fetch still reports success");

    assert!(store.snapshot().comments.is_empty());
}

#[tokio::test]
async fn late_fetch_failure_cannot_mark_a_cleared_thread_errored() {
    let (release, gate) = oneshot::channel();
    let gateway = Arc::new(GatedGateway {
        gate: tokio::sync::Mutex::new(Some(gate)),
        outcome: Err(CommentGatewayError::connection("refused")),
        calls: AtomicU32::new(0),
    });
    let store = Arc::new(CommentStore::new(Arc::clone(&gateway)));

    let slow = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.fetch_comments("vuejs-3-masterclass").await }
    });
    while gateway.calls.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    store.clear_comments();
    let _ = release.send(());
    slow.await
        .expect("task completes")
        .expect("superseded failure is discarded");

    let snapshot = store.snapshot();
    assert!(snapshot.comments.is_empty());
    assert!(snapshot.error.is_none());
}
