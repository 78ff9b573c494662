//! # storage-adapters
//!
//! Implementations of `UserRepository` and `PostRepository`.
//!
//! - [`MemoryStore`] is always compiled. It backs tests and runs the server
//!   when no database URL is configured.
//! - [`PgStore`] (feature `db-postgres`) keeps each post as one JSONB document.

pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "db-postgres")]
pub use postgres::PgStore;
