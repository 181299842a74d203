//! Outbound port for course catalogue retrieval.
//!
//! Filtering is a client-side concern: the source returns the full course
//! collection and the course store composes predicates over a fresh copy
//! (see [`crate::domain::CourseFilter`]).

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::catalogue::{Course, CourseDetail};

define_port_error! {
    /// Errors raised when reading the catalogue.
    pub enum CatalogueSourceError {
        /// The backend could not be reached.
        Connection { message: String } =>
            "catalogue connection failed: {message}",
        /// The backend answered with a failure status.
        Rejected { status: u16, message: String } =>
            "catalogue request rejected ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "catalogue response malformed: {message}",
    }
}

/// Outbound port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Return the full course collection (summaries without detail).
    async fn list_courses(&self) -> Result<Vec<Course>, CatalogueSourceError>;

    /// Return the detail payload for one course, `None` when the slug is
    /// unknown.
    async fn course_detail(&self, slug: &str)
    -> Result<Option<CourseDetail>, CatalogueSourceError>;
}
