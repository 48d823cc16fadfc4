//! Login Use Case
//!
//! Verifies credentials with the identity provider and resolves the
//! user's role from the directory. The session artifact is only handed
//! to the caller when both steps succeed, so a cookie can never be
//! issued for an account with no role record.

use std::sync::Arc;

use kernel::role::Role;
use uuid::Uuid;

use crate::domain::directory::DirectoryRepository;
use crate::domain::email::Email;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub user_id: Uuid,
    pub email: Email,
    pub role: Role,
    /// Session artifact for the transport cookie
    pub session_token: String,
}

/// Login use case
pub struct LoginUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    provider: Arc<P>,
    directory: Arc<D>,
}

impl<P, D> LoginUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    pub fn new(provider: Arc<P>, directory: Arc<D>) -> Self {
        Self { provider, directory }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // A malformed address cannot belong to a valid account; reject it
        // the same way the provider would, without leaking which part failed.
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let session = self.provider.password_grant(&email, &input.password).await?;

        let role = self
            .directory
            .find_role(session.user.id)
            .await?
            .ok_or(AuthError::RoleNotFound)?;

        tracing::info!(user_id = %session.user.id, role = %role, "User logged in");

        Ok(LoginOutput {
            user_id: session.user.id,
            email: session.user.email,
            role,
            session_token: session.access_token,
        })
    }
}
