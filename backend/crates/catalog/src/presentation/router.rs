//! Catalog Router
//!
//! Split into a public read router and an admin mutation router so the
//! binary can layer the auth gates onto the mutations only.

use axum::Router;
use axum::routing::{get, post, put};

use crate::domain::{CatalogStore, ImageStore};
use crate::presentation::handlers::{self, CatalogAppState};

/// Public read endpoints: list and detail
pub fn public_routes<S, I>(state: CatalogAppState<S, I>) -> Router
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_products::<S, I>))
        .route("/{id}", get(handlers::get_product::<S, I>))
        .with_state(state)
}

/// Mutation endpoints. The caller is expected to wrap this router with
/// the authenticate and require-admin gates before merging.
pub fn admin_routes<S, I>(state: CatalogAppState<S, I>) -> Router
where
    S: CatalogStore + Send + Sync + 'static,
    I: ImageStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(handlers::create_product::<S, I>))
        .route(
            "/{id}",
            put(handlers::update_product::<S, I>).delete(handlers::delete_product::<S, I>),
        )
        .with_state(state)
}
