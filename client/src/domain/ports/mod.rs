//! Domain ports for the hexagonal boundary.
//!
//! Each store receives its ports at construction; swapping the networked
//! adapters for the fixtures (or for test mocks) never touches store logic.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod catalogue_source;
mod category_source;
mod comment_gateway;
mod token_store;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{AuthGateway, AuthGatewayError, AuthSession, Credentials};
#[cfg(test)]
pub use catalogue_source::MockCatalogueSource;
pub use catalogue_source::{CatalogueSource, CatalogueSourceError};
#[cfg(test)]
pub use category_source::MockCategorySource;
pub use category_source::{CategorySource, CategorySourceError};
#[cfg(test)]
pub use comment_gateway::MockCommentGateway;
pub use comment_gateway::{CommentGateway, CommentGatewayError};
#[cfg(test)]
pub use token_store::MockTokenStore;
pub use token_store::{TokenStore, TokenStoreError};
