//! HTTP Handlers
//!
//! Session issuance endpoints. The transport cookie is set in exactly one
//! place (login success) and cleared in three (dead session on /me, both
//! logout branches); no handler caches the artifact.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::{AuthConfig, SESSION_COOKIE};
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::directory::DirectoryRepository;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LogoutResponse, MeResponse, RegisterRequest, RegisterResponse,
    UserDto,
};

/// Shared state for auth handlers
pub struct AuthAppState<P, D>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    pub provider: Arc<P>,
    pub directory: Arc<D>,
    pub config: Arc<AuthConfig>,
}

impl<P, D> Clone for AuthAppState<P, D>
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

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<P, D>(
    State(state): State<AuthAppState<P, D>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.provider.clone(), state.directory.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    // The only cookie-setting response in the system, and the use case only
    // hands the token out once credentials AND role both resolved.
    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            user: UserDto {
                id: output.user_id,
                email: output.email.into_inner(),
            },
            role: output.role,
        }),
    ))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<P, D>(
    State(state): State<AuthAppState<P, D>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.provider.clone(), state.directory.clone());

    let output = use_case
        .execute(RegisterInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserDto {
                id: output.user_id,
                email: output.email.into_inner(),
            },
        }),
    ))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/auth/me
///
/// On the dead-cookie branches the response also clears the cookie so a
/// browser never keeps presenting a token already known to be dead.
pub async fn me<P, D>(
    State(state): State<AuthAppState<P, D>>,
    headers: HeaderMap,
) -> Response
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, SESSION_COOKIE);

    let use_case = CurrentUserUseCase::new(state.provider.clone(), state.directory.clone());

    match use_case.execute(token.as_deref()).await {
        Ok(current) => (
            StatusCode::OK,
            Json(MeResponse {
                user: UserDto {
                    id: current.id,
                    email: current.email,
                },
                role: current.role,
            }),
        )
            .into_response(),
        Err(err @ (AuthError::Unauthenticated | AuthError::InvalidSession)) => {
            with_cleared_cookie(&state.config, err.into_response())
        }
        Err(err) => err.into_response(),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
///
/// Always succeeds, always clears the cookie, and is marked non-cacheable
/// so intermediaries never replay an authenticated page for this path.
pub async fn logout<P, D>(
    State(state): State<AuthAppState<P, D>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    P: IdentityProvider + Send + Sync + 'static,
    D: DirectoryRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, SESSION_COOKIE);

    let use_case = LogoutUseCase::new(state.provider.clone());
    // Best-effort revocation; the use case logs failures
    let _ = use_case.execute(token.as_deref()).await;

    let cookie = state.config.session_cookie().build_delete_cookie();

    (
        StatusCode::OK,
        [
            (header::SET_COOKIE, cookie),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        Json(LogoutResponse { ok: true }),
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Attach a cookie-clearing Set-Cookie header to a response
fn with_cleared_cookie(config: &AuthConfig, mut response: Response) -> Response {
    let clear = config.session_cookie().build_delete_cookie();
    if let Ok(value) = HeaderValue::from_str(&clear) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}
