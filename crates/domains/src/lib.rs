//! # domains
//!
//! Entities, the post reaction state machine, the error taxonomy and the
//! port traits that every adapter in the postboard workspace implements.
//! Nothing in here performs I/O.

pub mod error;
pub mod ids;
pub mod ports;
pub mod post;
pub mod user;

// Re-exporting for easier access in other crates
pub use error::*;
pub use ids::*;
pub use ports::*;
pub use post::*;
pub use user::*;
