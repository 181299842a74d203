//! Fixture gateways backed by the `example-data` payloads.
//!
//! These adapters stand in for the real backend while it is under
//! construction: same ports, same wire shapes, answered in-process. The
//! artificial latency of a real network hop is an injectable
//! [`Duration`] (zero by default) rather than a hardcoded sleep, so tests
//! stay fast and deterministic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

use crate::domain::catalogue::{Course, CourseDetail};
use crate::domain::category::Category;
use crate::domain::comment::{Comment, CommentDraft, NewComment};
use crate::domain::ports::{
    AuthGateway, AuthGatewayError, AuthSession, CatalogueSource, CatalogueSourceError,
    CategorySource, CategorySourceError, CommentGateway, CommentGatewayError, Credentials,
};
use crate::domain::user::{Author, User};

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Fixture authentication gateway.
///
/// Accepts any credentials and derives the user from them, the way the
/// future backend will echo the registered identity.
pub struct FixtureAuthGateway {
    latency: Duration,
}

impl FixtureAuthGateway {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Simulate a network round-trip of `latency` per call.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    fn user_from(credentials: &Credentials) -> User {
        User {
            id: 1,
            name: credentials
                .name
                .clone()
                .unwrap_or_else(|| "Utilisateur Test".to_owned()),
            email: credentials.email.clone(),
            role: "student".to_owned(),
            avatar: format!("https://i.pravatar.cc/150?u={}", credentials.email),
        }
    }
}

impl Default for FixtureAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError> {
        simulate_latency(self.latency).await;
        Ok(AuthSession {
            token: example_data::EXAMPLE_TOKEN.to_owned(),
            user: Self::user_from(credentials),
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthSession, AuthGatewayError> {
        // Registration logs the new account straight in.
        self.login(credentials).await
    }

    async fn current_user(&self, token: &str) -> Result<User, AuthGatewayError> {
        simulate_latency(self.latency).await;
        if token.is_empty() {
            return Err(AuthGatewayError::rejected("missing bearer token"));
        }
        let payload = example_data::example_user()
            .map_err(|error| AuthGatewayError::decode(error.to_string()))?;
        serde_json::from_value(payload).map_err(|error| AuthGatewayError::decode(error.to_string()))
    }
}

/// Fixture catalogue source serving the demonstration courses.
pub struct FixtureCatalogueSource {
    latency: Duration,
}

impl FixtureCatalogueSource {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Simulate a network round-trip of `latency` per call.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for FixtureCatalogueSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogueSource for FixtureCatalogueSource {
    async fn list_courses(&self) -> Result<Vec<Course>, CatalogueSourceError> {
        simulate_latency(self.latency).await;
        let payload = example_data::courses()
            .map_err(|error| CatalogueSourceError::decode(error.to_string()))?;
        serde_json::from_value(payload)
            .map_err(|error| CatalogueSourceError::decode(error.to_string()))
    }

    async fn course_detail(
        &self,
        slug: &str,
    ) -> Result<Option<CourseDetail>, CatalogueSourceError> {
        simulate_latency(self.latency).await;
        let known = self
            .list_courses()
            .await?
            .iter()
            .any(|course| course.slug() == slug);
        if !known {
            return Ok(None);
        }
        let payload = example_data::course_detail()
            .map_err(|error| CatalogueSourceError::decode(error.to_string()))?;
        serde_json::from_value(payload)
            .map(Some)
            .map_err(|error| CatalogueSourceError::decode(error.to_string()))
    }
}

/// Fixture category source serving the demonstration taxonomy.
pub struct FixtureCategorySource {
    latency: Duration,
}

impl FixtureCategorySource {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
        }
    }

    /// Simulate a network round-trip of `latency` per call.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for FixtureCategorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategorySource for FixtureCategorySource {
    async fn list_categories(&self) -> Result<Vec<Category>, CategorySourceError> {
        simulate_latency(self.latency).await;
        let payload = example_data::categories()
            .map_err(|error| CategorySourceError::decode(error.to_string()))?;
        serde_json::from_value(payload)
            .map_err(|error| CategorySourceError::decode(error.to_string()))
    }
}

/// Fixture comment gateway serving the seed thread and echoing submissions.
pub struct FixtureCommentGateway {
    latency: Duration,
    clock: Arc<dyn Clock>,
}

impl FixtureCommentGateway {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Inject the clock stamping `createdAt` on stored submissions.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            latency: Duration::ZERO,
            clock,
        }
    }

    /// Simulate a network round-trip of `latency` per call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for FixtureCommentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentGateway for FixtureCommentGateway {
    async fn thread(&self, _course_slug: &str) -> Result<Vec<Comment>, CommentGatewayError> {
        simulate_latency(self.latency).await;
        let payload = example_data::comment_thread()
            .map_err(|error| CommentGatewayError::decode(error.to_string()))?;
        serde_json::from_value(payload)
            .map_err(|error| CommentGatewayError::decode(error.to_string()))
    }

    async fn submit(
        &self,
        _course_slug: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentGatewayError> {
        simulate_latency(self.latency).await;
        Comment::new(CommentDraft {
            id: Uuid::new_v4(),
            author: Author {
                name: "Moi".to_owned(),
                avatar: "https://i.pravatar.cc/150?u=me".to_owned(),
            },
            content: comment.content().to_owned(),
            rating: comment.rating(),
            parent_id: comment.parent_id(),
            created_at: self.clock.utc(),
            replies: Vec::new(),
        })
        .map_err(|error| CommentGatewayError::decode(error.to_string()))
    }
}
