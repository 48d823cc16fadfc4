//! Resolved request identity
//!
//! The identity the authorization middleware attaches to a request once
//! the full pipeline (token -> provider verify -> role lookup) completes.
//! Never cached beyond the request lifetime.

use kernel::role::Role;
use uuid::Uuid;

/// Identity attached to a request's extensions by the `authenticate` gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }
}
