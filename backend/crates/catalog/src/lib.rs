//! Catalog Backend Module
//!
//! Thin product CRUD behind two storage seams:
//! - [`domain::CatalogStore`] - relational product store (PostgreSQL)
//! - [`domain::ImageStore`] - object storage for product images
//!
//! Read endpoints are public; mutation endpoints are exported as a
//! separate router so the binary can compose the auth gates in front.

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use domain::{CatalogStore, ImageStore, ListParams, Product};
pub use error::{CatalogError, CatalogResult};
pub use infra::object_storage::{HttpImageStore, StorageConfig};
pub use infra::postgres::PgCatalogStore;
pub use presentation::handlers::CatalogAppState;
pub use presentation::router::{admin_routes, public_routes};
