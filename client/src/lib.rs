//! Client-state engine for the Stratinka course marketplace.
//!
//! The crate owns the state a front-end renders from: session identity,
//! category taxonomy, course catalogue, and per-course comment threads. Each
//! slice of state lives in a store service with constructor-injected ports
//! (gateways and token storage), so the backing data source can be swapped
//! between the networked adapters and the in-process fixtures without
//! touching store logic. Views read cloneable snapshots; stores are the sole
//! writers of their slice.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod routing;
pub mod stores;

pub use config::ClientConfig;
pub use domain::{Error, ErrorCode};
