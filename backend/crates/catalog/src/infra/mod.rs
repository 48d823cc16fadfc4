//! Infrastructure Layer
//!
//! Store implementations backed by PostgreSQL and HTTP object storage.

pub mod object_storage;
pub mod postgres;

pub use object_storage::{HttpImageStore, StorageConfig};
pub use postgres::PgCatalogStore;
