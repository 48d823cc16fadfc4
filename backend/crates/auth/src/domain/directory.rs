//! Role directory seam
//!
//! Application-owned mapping from a provider user id to a role. One row
//! per registered user; the registering caller never sets the role.

use chrono::{DateTime, Utc};
use kernel::role::Role;
use uuid::Uuid;

use crate::domain::email::Email;
use crate::error::AuthResult;

/// Application-owned row mapping a user id to a role.
#[derive(Debug, Clone)]
pub struct DirectoryRecord {
    /// Provider-issued user id (primary key, not generated here)
    pub user_id: Uuid,
    pub email: Email,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl DirectoryRecord {
    /// Record for a freshly registered user. Role is always the default;
    /// promotion happens only by direct administrative data edits.
    pub fn provisioned(user_id: Uuid, email: Email) -> Self {
        Self {
            user_id,
            email,
            role: Role::default(),
            created_at: Utc::now(),
        }
    }
}

/// Directory repository trait
#[trait_variant::make(DirectoryRepository: Send)]
pub trait LocalDirectoryRepository {
    /// Insert a record for a newly registered user
    async fn insert(&self, record: &DirectoryRecord) -> AuthResult<()>;

    /// Look up the role for a user id
    async fn find_role(&self, user_id: Uuid) -> AuthResult<Option<Role>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioned_record_defaults_to_customer() {
        let record = DirectoryRecord::provisioned(
            Uuid::new_v4(),
            Email::from_trusted("new@example.com"),
        );
        assert_eq!(record.role, Role::Customer);
    }
}
