//! Current User Use Case
//!
//! Resolves the caller's identity and role from the transported session
//! artifact. Strict pipeline: no token, provider verification, role
//! lookup. Each stage either fails the request or adds identity data;
//! the no-token branch must never reach the directory.

use std::sync::Arc;

use crate::domain::directory::DirectoryRepository;
use crate::domain::identity::CurrentUser;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Current user use case
pub struct CurrentUserUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    provider: Arc<P>,
    directory: Arc<D>,
}

impl<P, D> CurrentUserUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    pub fn new(provider: Arc<P>, directory: Arc<D>) -> Self {
        Self { provider, directory }
    }

    /// Resolve identity and role from an optional session artifact.
    ///
    /// Idempotent and side-effect-free on success. Failure kinds tell the
    /// transport layer whether the cookie is dead (`Unauthenticated`,
    /// `InvalidSession`) and must be cleared.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<CurrentUser> {
        let token = session_token.ok_or(AuthError::Unauthenticated)?;

        let user = self.provider.verify_token(token).await?;

        let role = self
            .directory
            .find_role(user.id)
            .await?
            .ok_or(AuthError::RoleNotFound)?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email.into_inner(),
            role,
        })
    }
}
