//! Reqwest-backed gateway adapter.
//!
//! One adapter owns the transport for every port, the way a front-end
//! shares one HTTP client: base URL from configuration, a per-request
//! timeout, bearer-token injection from the shared token store, and JSON
//! envelope decoding. Transport details stay here; stores only ever see
//! port errors.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::domain::catalogue::{Course, CourseDetail};
use crate::domain::category::Category;
use crate::domain::comment::{Comment, NewComment};
use crate::domain::ports::{
    AuthGateway, AuthGatewayError, AuthSession, CatalogueSource, CatalogueSourceError,
    CategorySource, CategorySourceError, CommentGateway, CommentGatewayError, Credentials,
    TokenStore,
};
use crate::domain::user::User;

/// List and mutation payloads arrive wrapped in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Transport-level failure, mapped into each port's error type.
enum HttpError {
    Connection(String),
    Rejected { status: u16, message: String },
    Decode(String),
}

impl From<HttpError> for AuthGatewayError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Connection(message) => Self::connection(message),
            HttpError::Rejected { message, .. } => Self::rejected(message),
            HttpError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpError> for CatalogueSourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Connection(message) => Self::connection(message),
            HttpError::Rejected { status, message } => Self::rejected(status, message),
            HttpError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpError> for CategorySourceError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Connection(message) => Self::connection(message),
            HttpError::Rejected { status, message } => Self::rejected(status, message),
            HttpError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpError> for CommentGatewayError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Connection(message) => Self::connection(message),
            HttpError::Rejected { status, message } => Self::rejected(status, message),
            HttpError::Decode(message) => Self::decode(message),
        }
    }
}

/// Networked implementation of every gateway port.
pub struct HttpBackend<S> {
    client: Client,
    base_url: Url,
    tokens: Arc<S>,
}

impl<S> HttpBackend<S>
where
    S: TokenStore,
{
    /// Build the adapter with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &ClientConfig, tokens: Arc<S>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url().clone(),
            tokens,
        })
    }

    /// Resolve `path` (starting with `/`) against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        let joined = format!(
            "{}{path}",
            self.base_url.as_str().trim_end_matches('/')
        );
        Url::parse(&joined).map_err(|error| HttpError::Decode(error.to_string()))
    }

    /// Attach `Authorization: Bearer <token>` when a token is held.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(error) => {
                debug!(%error, "token storage unreadable, sending unauthenticated");
                request
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, HttpError> {
        match self.execute_opt(request).await? {
            Some(value) => Ok(value),
            None => Err(HttpError::Rejected {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: "resource not found".to_owned(),
            }),
        }
    }

    /// Like `execute`, but a 404 answer yields `Ok(None)`.
    async fn execute_opt<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>, HttpError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(HttpError::Rejected {
                status: status.as_u16(),
                message: rejection_message(status, &body),
            });
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|error| HttpError::Decode(error.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpError> {
        let url = self.endpoint(path)?;
        self.execute(self.client.get(url)).await
    }

    async fn get_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, HttpError> {
        let url = self.endpoint(path)?;
        self.execute_opt(self.client.get(url)).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let url = self.endpoint(path)?;
        self.execute(self.client.post(url).json(body)).await
    }
}

#[async_trait]
impl<S> AuthGateway for HttpBackend<S>
where
    S: TokenStore,
{
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError> {
        Ok(self.post("/auth/login", credentials).await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError> {
        Ok(self.post("/auth/register", credentials).await?)
    }

    async fn current_user(&self, _token: &str) -> Result<User, AuthGatewayError> {
        // The bearer header carries the token; the parameter documents the
        // contract for gateways without a shared token store.
        Ok(self.get("/auth/me").await?)
    }
}

#[async_trait]
impl<S> CatalogueSource for HttpBackend<S>
where
    S: TokenStore,
{
    async fn list_courses(&self) -> Result<Vec<Course>, CatalogueSourceError> {
        let envelope: Envelope<Vec<Course>> = self.get("/courses").await?;
        Ok(envelope.data)
    }

    async fn course_detail(
        &self,
        slug: &str,
    ) -> Result<Option<CourseDetail>, CatalogueSourceError> {
        let envelope: Option<Envelope<Course>> = self.get_opt(&format!("/courses/{slug}")).await?;
        Ok(envelope.and_then(|envelope| envelope.data.detail().cloned()))
    }
}

#[async_trait]
impl<S> CategorySource for HttpBackend<S>
where
    S: TokenStore,
{
    async fn list_categories(&self) -> Result<Vec<Category>, CategorySourceError> {
        let envelope: Envelope<Vec<Category>> = self.get("/categories").await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl<S> CommentGateway for HttpBackend<S>
where
    S: TokenStore,
{
    async fn thread(&self, course_slug: &str) -> Result<Vec<Comment>, CommentGatewayError> {
        let envelope: Envelope<Vec<Comment>> = self
            .get(&format!("/courses/{course_slug}/comments"))
            .await?;
        Ok(envelope.data)
    }

    async fn submit(
        &self,
        course_slug: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentGatewayError> {
        let envelope: Envelope<Comment> = self
            .post(&format!("/courses/{course_slug}/comments"), comment)
            .await?;
        Ok(envelope.data)
    }
}

/// Rejection text for a non-success response, never empty.
///
/// Serves the response body verbatim when it carries any text; a bodyless
/// rejection falls back to the status line so downstream error types always
/// hold a displayable message.
fn rejection_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        match status.canonical_reason() {
            Some(reason) => format!("HTTP {} {reason}", status.as_u16()),
            None => format!("HTTP {}", status.as_u16()),
        }
    } else {
        text.to_owned()
    }
}

fn map_transport_error(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Connection(format!("request timed out: {error}"))
    } else {
        HttpError::Connection(error.to_string())
    }
}
