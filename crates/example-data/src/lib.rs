//! Fixture payloads for the course-marketplace client engine.
//!
//! This crate embeds the demonstration catalogue, category taxonomy, comment
//! thread, and example account that stand in for the real backend while it is
//! under construction. Payloads are plain JSON, shaped exactly like the wire
//! envelopes the backend will eventually serve, and are deliberately
//! independent of the client's domain types to avoid circular dependencies.
//! The client's fixture gateways deserialize them through the same serde
//! contracts used for real responses.

use serde_json::Value;

mod error;

pub use error::FixtureError;

/// Bearer token issued by the fixture auth gateway.
pub const EXAMPLE_TOKEN: &str = "fixture-session-token";

const COURSES_JSON: &str = include_str!("../data/courses.json");
const COURSE_DETAIL_JSON: &str = include_str!("../data/course_detail.json");
const CATEGORIES_JSON: &str = include_str!("../data/categories.json");
const COMMENTS_JSON: &str = include_str!("../data/comments.json");
const ME_JSON: &str = include_str!("../data/me.json");

fn parse(name: &'static str, raw: &str) -> Result<Value, FixtureError> {
    serde_json::from_str(raw).map_err(|source| FixtureError::Malformed { name, source })
}

/// The demonstration course catalogue (summaries only, no detail fields).
pub fn courses() -> Result<Value, FixtureError> {
    parse("courses", COURSES_JSON)
}

/// The detail payload attached to a course on first slug lookup.
///
/// Every fixture course shares the same sections and learning outcomes; only
/// the attachment semantics matter for demonstration purposes.
pub fn course_detail() -> Result<Value, FixtureError> {
    parse("course_detail", COURSE_DETAIL_JSON)
}

/// The full category taxonomy, top-level categories with nested
/// subcategories.
pub fn categories() -> Result<Value, FixtureError> {
    parse("categories", CATEGORIES_JSON)
}

/// The seed comment thread served for any course slug.
pub fn comment_thread() -> Result<Value, FixtureError> {
    parse("comments", COMMENTS_JSON)
}

/// The account returned by the fixture identity endpoint.
pub fn example_user() -> Result<Value, FixtureError> {
    parse("me", ME_JSON)
}
