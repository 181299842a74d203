//! Comment-thread domain types.
//!
//! A thread is exactly two levels deep: top-level comments (which may carry
//! a review rating) and their ordered replies. Top-level ordering is
//! newest-first; replies are oldest-first within their parent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Author;

/// Validation errors returned by comment constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    /// Comment content was empty after trimming.
    EmptyContent,
    /// Rating outside the accepted `1..=5` range.
    InvalidRating { rating: u8 },
    /// A reply carried nested replies of its own.
    ReplyTooDeep,
    /// A reply's parent id did not point at its enclosing comment.
    ReplyParentMismatch,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "comment content must not be empty"),
            Self::InvalidRating { rating } => {
                write!(f, "comment rating must lie within 1..=5 (got {rating})")
            }
            Self::ReplyTooDeep => write!(f, "replies must not carry nested replies"),
            Self::ReplyParentMismatch => {
                write!(f, "reply parent id must reference the enclosing comment")
            }
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Input payload for [`Comment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CommentDraft {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub author: Author,
    pub content: String,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// Single comment, top-level or reply.
///
/// ## Invariants
/// - `content` is non-empty once trimmed.
/// - `rating`, when present, lies within `1..=5`.
/// - Every entry in `replies` names this comment as its parent and carries
///   no replies of its own (the thread is depth two).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Comment {
    id: Uuid,
    #[serde(rename = "user")]
    author: Author,
    content: String,
    rating: Option<u8>,
    parent_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    replies: Vec<Comment>,
}

impl Comment {
    /// Validate and construct a comment.
    pub fn new(draft: CommentDraft) -> Result<Self, CommentValidationError> {
        Self::try_from(draft)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn author(&self) -> &Author {
        &self.author
    }
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
    /// Review rating; only top-level course reviews carry one.
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }
    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn replies(&self) -> &[Comment] {
        self.replies.as_slice()
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Append a reply to this comment's thread (oldest-first ordering).
    ///
    /// The caller guarantees `reply.parent_id()` references this comment;
    /// the store resolves parentage before calling.
    pub(crate) fn push_reply(&mut self, reply: Comment) {
        self.replies.push(reply);
    }
}

impl TryFrom<CommentDraft> for Comment {
    type Error = CommentValidationError;

    fn try_from(draft: CommentDraft) -> Result<Self, Self::Error> {
        if draft.content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        if let Some(rating) = draft.rating
            && !(1..=5).contains(&rating)
        {
            return Err(CommentValidationError::InvalidRating { rating });
        }
        for reply in &draft.replies {
            if !reply.replies.is_empty() {
                return Err(CommentValidationError::ReplyTooDeep);
            }
            if reply.parent_id != Some(draft.id) {
                return Err(CommentValidationError::ReplyParentMismatch);
            }
        }

        Ok(Self {
            id: draft.id,
            author: draft.author,
            content: draft.content,
            rating: draft.rating,
            parent_id: draft.parent_id,
            created_at: draft.created_at,
            replies: draft.replies,
        })
    }
}

impl<'de> Deserialize<'de> for Comment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        CommentDraft::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

/// Outgoing comment submission.
///
/// Content is validated at construction so a store never carries an
/// unpostable draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    content: String,
    rating: Option<u8>,
    parent_id: Option<Uuid>,
}

impl NewComment {
    /// Validate and construct a submission.
    pub fn new(
        content: impl Into<String>,
        rating: Option<u8>,
        parent_id: Option<Uuid>,
    ) -> Result<Self, CommentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        if let Some(rating) = rating
            && !(1..=5).contains(&rating)
        {
            return Err(CommentValidationError::InvalidRating { rating });
        }
        Ok(Self {
            content,
            rating,
            parent_id,
        })
    }

    /// Convenience constructor for a top-level comment.
    pub fn top_level(
        content: impl Into<String>,
        rating: Option<u8>,
    ) -> Result<Self, CommentValidationError> {
        Self::new(content, rating, None)
    }

    /// Convenience constructor for a reply.
    pub fn reply(
        content: impl Into<String>,
        parent_id: Uuid,
    ) -> Result<Self, CommentValidationError> {
        Self::new(content, None, Some(parent_id))
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }
    pub fn rating(&self) -> Option<u8> {
        self.rating
    }
    pub fn parent_id(&self) -> Option<Uuid> {
        self.parent_id
    }
}
