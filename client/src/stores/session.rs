//! Session store: current-user identity and bearer token.

use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use super::{displayable, read_lock, write_lock};
use crate::domain::ports::{AuthGateway, AuthGatewayError, Credentials, TokenStore};
use crate::domain::{ClientResult, Error, User};

const LOGIN_ERROR: &str = "Identifiants incorrects";
const REGISTER_ERROR: &str = "Erreur lors de l'inscription";

/// Read-only view of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl SessionSnapshot {
    /// Authenticated iff a token is held; the user may still be in flight.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Single-writer service owning session identity.
///
/// The persisted token is read once at construction to seed in-memory
/// state; afterwards the store is the only writer of both the in-memory
/// slice and the persistent entry. Token and user are set and cleared
/// together, except that the user is transiently `None` until the "who am
/// I" fetch resolves.
pub struct SessionStore<G, S> {
    gateway: Arc<G>,
    tokens: Arc<S>,
    state: RwLock<SessionState>,
}

impl<G, S> SessionStore<G, S>
where
    G: AuthGateway,
    S: TokenStore,
{
    /// Build the store, seeding the token from persistent storage.
    ///
    /// A storage read failure degrades to an unauthenticated session rather
    /// than blocking startup; the failure is logged.
    pub fn new(gateway: Arc<G>, tokens: Arc<S>) -> Self {
        let token = match tokens.load() {
            Ok(token) => token,
            Err(error) => {
                warn!(%error, "token storage unreadable, starting unauthenticated");
                None
            }
        };
        Self {
            gateway,
            tokens,
            state: RwLock::new(SessionState { token, user: None }),
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = read_lock(&self.state);
        SessionSnapshot {
            token: state.token.clone(),
            user: state.user.clone(),
        }
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        read_lock(&self.state).token.is_some()
    }

    /// Exchange credentials for a session.
    ///
    /// On success token and user are set together and the token is
    /// persisted; on failure the previous session state is untouched and
    /// the error carries a display message for the caller.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<()> {
        let session = self
            .gateway
            .login(credentials)
            .await
            .map_err(|error| map_auth_error(error, LOGIN_ERROR))?;
        if let Err(error) = self.tokens.save(&session.token) {
            // The in-memory session still works for this process.
            warn!(%error, "failed to persist session token");
        }
        let mut state = write_lock(&self.state);
        state.token = Some(session.token);
        state.user = Some(session.user);
        Ok(())
    }

    /// Create an account and log it in.
    pub async fn register(&self, credentials: &Credentials) -> ClientResult<()> {
        let session = self
            .gateway
            .register(credentials)
            .await
            .map_err(|error| map_auth_error(error, REGISTER_ERROR))?;
        if let Err(error) = self.tokens.save(&session.token) {
            warn!(%error, "failed to persist session token");
        }
        let mut state = write_lock(&self.state);
        state.token = Some(session.token);
        state.user = Some(session.user);
        Ok(())
    }

    /// Resolve the user behind the held token.
    ///
    /// A no-op without a token. An identity failure means the session is
    /// invalid: the store logs out implicitly instead of surfacing the
    /// error.
    pub async fn fetch_user(&self) -> ClientResult<()> {
        let Some(token) = read_lock(&self.state).token.clone() else {
            return Ok(());
        };
        match self.gateway.current_user(&token).await {
            Ok(user) => {
                write_lock(&self.state).user = Some(user);
                Ok(())
            }
            Err(error) => {
                warn!(%error, "identity fetch failed, logging out");
                self.logout();
                Ok(())
            }
        }
    }

    /// Clear token and user together and remove the persisted entry.
    ///
    /// Always leaves the store unauthenticated, regardless of prior state.
    pub fn logout(&self) {
        {
            let mut state = write_lock(&self.state);
            state.token = None;
            state.user = None;
        }
        if let Err(error) = self.tokens.clear() {
            warn!(%error, "failed to remove persisted token");
        }
        debug!("session cleared");
    }
}

fn map_auth_error(error: AuthGatewayError, fallback: &str) -> Error {
    match error {
        AuthGatewayError::Connection { message } => {
            Error::unavailable(displayable(message, fallback))
        }
        AuthGatewayError::Rejected { message } => {
            Error::unauthorized(displayable(message, fallback))
        }
        AuthGatewayError::Decode { message } => Error::internal(displayable(message, fallback)),
    }
}

#[cfg(test)]
mod tests;
