//! Infrastructure Layer
//!
//! External service adapters and database implementations.

pub mod identity_http;
pub mod postgres;

pub use identity_http::{HttpIdentityProvider, IdentityConfig};
pub use postgres::PgDirectoryRepository;
