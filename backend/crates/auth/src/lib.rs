//! Auth (Session & Authorization) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity types, value objects, provider/directory traits
//! - `application/` - Use cases and application services
//! - `infra/` - Identity service adapter, database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Login/registration against an external identity provider
//! - Opaque bearer-token sessions transported via an HttpOnly cookie
//! - Role resolution from an application-owned directory table
//! - Composable route gates (authenticate, require administrator)
//!
//! ## Security Model
//! - Credentials and tokens are owned by the identity provider; this crate
//!   stores and forwards the token, never decodes it
//! - Cookie is HttpOnly, SameSite=Strict, Secure in production, Max-Age 1 day
//! - Identity is re-derived from the cookie on every privileged request

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, SESSION_COOKIE};
pub use domain::identity::CurrentUser;
pub use error::{AuthError, AuthResult};
pub use infra::identity_http::{HttpIdentityProvider, IdentityConfig};
pub use infra::postgres::PgDirectoryRepository;
pub use presentation::middleware::{AuthGateState, authenticate, require_admin};
pub use presentation::router::{auth_gate_state, auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
