//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::directory::DirectoryRepository;
use crate::domain::provider::IdentityProvider;
use crate::infra::identity_http::HttpIdentityProvider;
use crate::infra::postgres::PgDirectoryRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::AuthGateState;

/// Create the auth router with the HTTP provider and PostgreSQL directory
pub fn auth_router(
    provider: HttpIdentityProvider,
    pool: PgPool,
    config: AuthConfig,
) -> Router {
    auth_router_generic(provider, PgDirectoryRepository::new(pool), config)
}

/// Create a generic auth router for any provider/directory implementation
pub fn auth_router_generic<P, D>(provider: P, directory: D, config: AuthConfig) -> Router
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        provider: Arc::new(provider),
        directory: Arc::new(directory),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", post(handlers::login::<P, D>))
        .route("/register", post(handlers::register::<P, D>))
        .route("/me", get(handlers::me::<P, D>))
        .route("/logout", post(handlers::logout::<P, D>))
        .with_state(state)
}

/// Middleware state sharing the same provider/directory/config as a router
pub fn auth_gate_state<P, D>(
    provider: Arc<P>,
    directory: Arc<D>,
    config: Arc<AuthConfig>,
) -> AuthGateState<P, D>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    AuthGateState::new(provider, directory, config)
}
