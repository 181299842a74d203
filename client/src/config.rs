//! Environment-sourced client configuration.

use std::time::Duration;

use tracing::warn;
use url::Url;

/// Environment variable overriding the backend base URL.
pub const API_URL_VAR: &str = "STRATINKA_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const API_TIMEOUT_VAR: &str = "STRATINKA_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Backend connection settings for the networked gateways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration with an explicit base URL and the default
    /// timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read configuration from the environment, falling back to the local
    /// development defaults.
    ///
    /// A malformed override is logged and ignored rather than failing
    /// startup.
    pub fn from_env() -> Self {
        let base_url = match std::env::var(API_URL_VAR) {
            Ok(raw) => match Url::parse(&raw) {
                Ok(url) => url,
                Err(error) => {
                    warn!(%error, raw, "ignoring malformed {API_URL_VAR}");
                    default_base_url()
                }
            },
            Err(_) => default_base_url(),
        };
        let timeout = match std::env::var(API_TIMEOUT_VAR) {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(seconds) => Duration::from_secs(seconds),
                Err(error) => {
                    warn!(%error, raw, "ignoring malformed {API_TIMEOUT_VAR}");
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };
        Self { base_url, timeout }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Backend base URL, without a trailing slash guarantee.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout applied by the HTTP client.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

fn default_base_url() -> Url {
    match Url::parse(DEFAULT_BASE_URL) {
        Ok(url) => url,
        // The literal is a valid URL; this cannot be reached.
        Err(error) => unreachable!("default base URL must parse: {error}"),
    }
}
