//! Identity Provider seam
//!
//! The external identity service is the system of record for credentials
//! and tokens. This trait is a pure pass-through: implementations surface
//! failures as the fixed error taxonomy, they never interpret them.

use uuid::Uuid;

use crate::domain::email::Email;
use crate::error::AuthResult;

/// What the provider reports about an account holder.
#[derive(Debug, Clone)]
pub struct ProviderUser {
    pub id: Uuid,
    pub email: Email,
}

/// Result of a successful credential verification.
///
/// The access token is the session artifact: opaque, provider-managed
/// expiry. We store and forward it, never decode it.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub access_token: String,
    pub user: ProviderUser,
}

/// External identity service operations
///
/// Error translation contract for implementations:
/// - credential rejection on `password_grant` -> `InvalidCredentials`
/// - token rejection on `verify_token` -> `InvalidSession`
/// - account-creation rejection on `create_account` -> `Registration`
/// - any transport failure -> `Provider`
#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Verify credentials and issue a session artifact
    async fn password_grant(&self, email: &Email, password: &str) -> AuthResult<ProviderSession>;

    /// Create an account (does not issue a session artifact)
    async fn create_account(&self, email: &Email, password: &str) -> AuthResult<ProviderUser>;

    /// Resolve the identity behind a session artifact
    async fn verify_token(&self, token: &str) -> AuthResult<ProviderUser>;

    /// Invalidate a session artifact at the provider
    async fn revoke_token(&self, token: &str) -> AuthResult<()>;
}
