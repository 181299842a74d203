//! Outbound port for the category taxonomy.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::category::Category;

define_port_error! {
    /// Errors raised when reading the taxonomy.
    pub enum CategorySourceError {
        /// The backend could not be reached.
        Connection { message: String } =>
            "category connection failed: {message}",
        /// The backend answered with a failure status.
        Rejected { status: u16, message: String } =>
            "category request rejected ({status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "category response malformed: {message}",
    }
}

/// Outbound port for taxonomy reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategorySource: Send + Sync {
    /// Return the full category taxonomy in display order.
    async fn list_categories(&self) -> Result<Vec<Category>, CategorySourceError>;
}
