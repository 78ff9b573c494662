//! # api-adapters
//!
//! The HTTP surface of postboard. Handlers only translate between JSON and
//! the services; every rule lives below this crate.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod router;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use router::router;
#[cfg(feature = "web-axum")]
pub use state::AppState;
