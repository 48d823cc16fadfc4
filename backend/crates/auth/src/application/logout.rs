//! Logout Use Case
//!
//! Token revocation at the provider is best-effort: the transport-level
//! cookie clear is the operation that must always succeed, and it is
//! owned by the handler. Logging out with no session is a no-op success.

use std::sync::Arc;

use crate::domain::provider::IdentityProvider;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
}

impl<P> LogoutUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        if let Some(token) = session_token {
            if let Err(err) = self.provider.revoke_token(token).await {
                tracing::warn!(error = %err, "Token revocation failed; clearing cookie anyway");
            }
        }

        Ok(())
    }
}
