//! Adapters implementing the outbound ports.
//!
//! `http` talks to the real backend over reqwest; `token` persists the
//! session token; `fixture` serves the bundled example payloads for demos
//! and tests without a network.

pub mod http;
pub mod token;

#[cfg(feature = "example-data")]
pub mod fixture;

pub use http::HttpBackend;
pub use token::{FileTokenStore, InMemoryTokenStore};

#[cfg(feature = "example-data")]
pub use fixture::{
    FixtureAuthGateway, FixtureCatalogueSource, FixtureCategorySource, FixtureCommentGateway,
};
