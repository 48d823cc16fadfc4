//! Register Use Case
//!
//! Two-phase provisioning: create the account at the identity provider,
//! then insert exactly one directory record with the default role. The
//! phases are not atomic; a failed insert is surfaced as its own variant
//! so the orphaned provider account can be reconciled by an operator.
//! The provider's narrow interface offers no account delete, so no
//! compensating delete is attempted.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::directory::{DirectoryRecord, DirectoryRepository};
use crate::domain::email::Email;
use crate::domain::provider::IdentityProvider;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Register output
///
/// No session artifact: registration requires a subsequent explicit login.
pub struct RegisterOutput {
    pub user_id: Uuid,
    pub email: Email,
}

/// Register use case
pub struct RegisterUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    provider: Arc<P>,
    directory: Arc<D>,
}

impl<P, D> RegisterUseCase<P, D>
where
    P: IdentityProvider,
    D: DirectoryRepository,
{
    pub fn new(provider: Arc<P>, directory: Arc<D>) -> Self {
        Self { provider, directory }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let email =
            Email::new(input.email).map_err(|e| AuthError::Registration(e.message().to_string()))?;

        // Phase 1: identity account
        let user = self.provider.create_account(&email, &input.password).await?;

        // Phase 2: directory record, default role. Role is never taken from
        // the caller.
        let record = DirectoryRecord::provisioned(user.id, user.email.clone());

        if let Err(err) = self.directory.insert(&record).await {
            tracing::error!(
                identity_id = %user.id,
                error = %err,
                "Directory insert failed after identity creation"
            );
            return Err(AuthError::ProfileProvisioningFailed { identity_id: user.id });
        }

        tracing::info!(user_id = %user.id, "User registered");

        Ok(RegisterOutput {
            user_id: user.id,
            email: user.email,
        })
    }
}
