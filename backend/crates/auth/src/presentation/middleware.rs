//! Auth Middleware
//!
//! Two composable gates for protected routes:
//! - [`authenticate`]: resolves identity from the session cookie and
//!   attaches [`CurrentUser`] to request extensions, or terminates the
//!   request. Strict pipeline; no stage proceeds without the previous one.
//! - [`require_admin`]: requires an already-attached identity with the
//!   administrator role.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CurrentUserUseCase;
use crate::application::config::{AuthConfig, SESSION_COOKIE};
use crate::domain::directory::DirectoryRepository;
use crate::domain::identity::CurrentUser;
use crate::domain::provider::IdentityProvider;
use crate::error::AuthError;

/// Middleware state for the authenticate gate
pub struct AuthGateState<P, D>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    pub provider: Arc<P>,
    pub directory: Arc<D>,
    pub config: Arc<AuthConfig>,
}

impl<P, D> AuthGateState<P, D>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, directory: Arc<D>, config: Arc<AuthConfig>) -> Self {
        Self {
            provider,
            directory,
            config,
        }
    }
}

impl<P, D> Clone for AuthGateState<P, D>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            directory: self.directory.clone(),
            config: self.config.clone(),
        }
    }
}

/// Middleware that resolves and attaches the caller's identity.
///
/// `NoToken -> 401`; provider rejection `-> 401`; role missing `-> 500`;
/// otherwise the request proceeds with [`CurrentUser`] attached.
pub async fn authenticate<P, D>(
    State(state): State<AuthGateState<P, D>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), SESSION_COOKIE);

    let use_case = CurrentUserUseCase::new(state.provider.clone(), state.directory.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(current) => {
            req.extensions_mut().insert(current);
            Ok(next.run(req).await)
        }
        Err(err) => Err(err.into_response()),
    }
}

/// Middleware that requires the administrator role.
///
/// Must run after [`authenticate`]; a missing identity means the pipeline
/// was composed wrong or skipped, and is treated as unauthenticated.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<CurrentUser>() {
        None => Err(AuthError::Unauthenticated.into_response()),
        Some(user) if !user.is_administrator() => {
            tracing::debug!(user_id = %user.id, role = %user.role, "Admin route denied");
            Err(AuthError::Unauthorized.into_response())
        }
        Some(_) => Ok(next.run(req).await),
    }
}
