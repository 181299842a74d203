//! Comment store: two-level thread for the course being viewed.

use std::sync::{Arc, RwLock};

use serde_json::json;
use tracing::debug;

use super::{FetchSlot, displayable, read_lock, write_lock};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::ports::{CommentGateway, CommentGatewayError};
use crate::domain::{ClientResult, Error};

const LOAD_ERROR: &str = "Erreur lors du chargement des commentaires";
const POST_ERROR: &str = "Impossible d'envoyer le commentaire";

/// Read-only view of the thread state.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentSnapshot {
    /// Top-level comments, newest first; replies oldest first within each.
    pub comments: Vec<Comment>,
    pub loading: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct CommentState {
    comments: Vec<Comment>,
    loading: bool,
    submitting: bool,
    error: Option<String>,
}

/// Single-writer service owning one course's comment thread.
///
/// The thread is replaced wholesale on fetch and reset by
/// [`CommentStore::clear_comments`]; posting applies the stored comment
/// deterministically (top-level prepend, reply append) with no partial
/// mutation on failure.
pub struct CommentStore<G> {
    gateway: Arc<G>,
    state: RwLock<CommentState>,
    thread_slot: FetchSlot,
}

impl<G> CommentStore<G>
where
    G: CommentGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: RwLock::new(CommentState::default()),
            thread_slot: FetchSlot::default(),
        }
    }

    /// Current thread snapshot.
    pub fn snapshot(&self) -> CommentSnapshot {
        let state = read_lock(&self.state);
        CommentSnapshot {
            comments: state.comments.clone(),
            loading: state.loading,
            submitting: state.submitting,
            error: state.error.clone(),
        }
    }

    /// Replace the whole thread with the one stored for `course_slug`.
    ///
    /// Never merges with a previous thread; a completion superseded by a
    /// newer fetch or by [`CommentStore::clear_comments`] is discarded. The
    /// loading flag clears on every exit path.
    pub async fn fetch_comments(&self, course_slug: &str) -> ClientResult<()> {
        let ticket = self.thread_slot.ticket();
        {
            let mut state = write_lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let result = self.gateway.thread(course_slug).await;

        let mut state = write_lock(&self.state);
        state.loading = false;
        match result {
            Ok(comments) => {
                if !self.thread_slot.is_current(ticket) {
                    debug!(course_slug, "stale thread fetch discarded");
                    return Ok(());
                }
                state.comments = comments;
                Ok(())
            }
            Err(error) => {
                if !self.thread_slot.is_current(ticket) {
                    debug!(%error, course_slug, "stale thread failure discarded");
                    return Ok(());
                }
                debug!(%error, course_slug, "thread fetch failed");
                state.error = Some(LOAD_ERROR.to_owned());
                Err(map_comment_error(error))
            }
        }
    }

    /// Submit a comment and apply it to the loaded thread.
    ///
    /// A top-level comment is prepended (newest first); a reply is appended
    /// to its parent's replies (oldest first). A reply whose parent is not
    /// a top-level comment of the loaded thread fails with
    /// [`crate::domain::ErrorCode::ParentNotFound`] before anything is
    /// submitted. On submission failure the thread is untouched. The
    /// submitting flag clears on every exit path.
    pub async fn post_comment(
        &self,
        course_slug: &str,
        comment: &NewComment,
    ) -> ClientResult<Comment> {
        write_lock(&self.state).submitting = true;
        let result = self.submit_and_apply(course_slug, comment).await;
        write_lock(&self.state).submitting = false;
        result
    }

    async fn submit_and_apply(
        &self,
        course_slug: &str,
        comment: &NewComment,
    ) -> ClientResult<Comment> {
        if let Some(parent_id) = comment.parent_id()
            && !self.has_top_level(parent_id)
        {
            return Err(parent_not_found(parent_id));
        }

        let stored = self
            .gateway
            .submit(course_slug, comment)
            .await
            .map_err(|error| {
                debug!(%error, course_slug, "comment submission failed");
                // Fixed display message; the code still tells callers apart.
                Error::unavailable(POST_ERROR)
            })?;

        let mut state = write_lock(&self.state);
        match stored.parent_id() {
            Some(parent_id) => {
                let Some(parent) = state
                    .comments
                    .iter_mut()
                    .find(|candidate| candidate.id() == parent_id)
                else {
                    // The thread changed while the submission was in flight.
                    return Err(parent_not_found(parent_id));
                };
                parent.push_reply(stored.clone());
            }
            None => state.comments.insert(0, stored.clone()),
        }
        Ok(stored)
    }

    /// Reset the thread to empty, from any state.
    ///
    /// Also invalidates in-flight fetches so a late completion cannot
    /// resurrect the thread of a course navigated away from.
    pub fn clear_comments(&self) {
        self.thread_slot.invalidate();
        let mut state = write_lock(&self.state);
        state.comments.clear();
        state.error = None;
        debug!("comment thread cleared");
    }

    fn has_top_level(&self, id: uuid::Uuid) -> bool {
        read_lock(&self.state)
            .comments
            .iter()
            .any(|comment| comment.id() == id)
    }
}

fn parent_not_found(parent_id: uuid::Uuid) -> Error {
    Error::parent_not_found("Commentaire parent introuvable")
        .with_details(json!({ "parentId": parent_id }))
}

fn map_comment_error(error: CommentGatewayError) -> Error {
    match error {
        CommentGatewayError::Connection { message }
        | CommentGatewayError::Rejected { message, .. } => {
            Error::unavailable(displayable(message, LOAD_ERROR))
        }
        CommentGatewayError::Decode { message } => {
            Error::internal(displayable(message, LOAD_ERROR))
        }
    }
}

#[cfg(test)]
mod tests;
