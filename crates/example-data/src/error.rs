//! Errors for fixture payload loading.

use thiserror::Error;

/// Raised when an embedded payload fails to parse.
///
/// With the payloads compiled into the binary this indicates a broken
/// fixture edit rather than a runtime condition.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The named payload is not valid JSON.
    #[error("fixture payload `{name}` is malformed: {source}")]
    Malformed {
        /// Which embedded payload failed.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}
