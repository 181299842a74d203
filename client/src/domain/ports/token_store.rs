//! Persistent token storage port.
//!
//! One key-value entry survives restarts: the session bearer token. Absence
//! means unauthenticated. The session store is the only writer; gateway
//! adapters read the current value to attach the `Authorization` header.

use super::define_port_error;

define_port_error! {
    /// Errors raised by token persistence.
    pub enum TokenStoreError {
        /// The underlying storage could not be read or written.
        Storage { message: String } =>
            "token storage failed: {message}",
    }
}

/// Persistent storage for the session token.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Read the persisted token, `None` when absent.
    fn load(&self) -> Result<Option<String>, TokenStoreError>;

    /// Persist the token, replacing any previous value.
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the persisted token.
    fn clear(&self) -> Result<(), TokenStoreError>;
}
