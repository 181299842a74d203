//! Outbound port for comment threads.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::comment::{Comment, NewComment};

define_port_error! {
    /// Errors raised by the comment gateway.
    pub enum CommentGatewayError {
        /// The backend could not be reached.
        Connection { message: String } =>
            "comment gateway connection failed: {message}",
        /// The backend refused the fetch or submission.
        Rejected { status: u16, message: String } =>
            "comment request rejected ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "comment response malformed: {message}",
    }
}

/// Outbound port for reading and submitting comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentGateway: Send + Sync {
    /// Return the full two-level thread for one course.
    async fn thread(&self, course_slug: &str) -> Result<Vec<Comment>, CommentGatewayError>;

    /// Submit a new comment and return the stored record.
    async fn submit(
        &self,
        course_slug: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentGatewayError>;
}
