//! Outbound port for authentication and identity.
//!
//! Stores call this port to exchange credentials for a session and to
//! resolve the current user from a bearer token, without knowing whether a
//! networked backend or the in-process fixture answers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::define_port_error;
use crate::domain::user::User;

define_port_error! {
    /// Errors raised by the authentication gateway.
    pub enum AuthGatewayError {
        /// The backend could not be reached.
        Connection { message: String } =>
            "auth gateway connection failed: {message}",
        /// The backend answered but refused the request.
        Rejected { message: String } =>
            "authentication rejected: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "auth gateway response malformed: {message}",
    }
}

/// Login/registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Display name, supplied on registration only.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Token plus the user it authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Outbound port for authentication use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError>;

    /// Create an account and log it in.
    async fn register(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError>;

    /// Resolve the user a bearer token authenticates ("who am I").
    async fn current_user(&self, token: &str) -> Result<User, AuthGatewayError>;
}
