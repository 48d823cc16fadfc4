//! PostgreSQL Directory Repository

use kernel::role::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::directory::{DirectoryRecord, DirectoryRepository};
use crate::error::AuthResult;

/// PostgreSQL-backed role directory
#[derive(Clone)]
pub struct PgDirectoryRepository {
    pool: PgPool,
}

impl PgDirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DirectoryRepository for PgDirectoryRepository {
    async fn insert(&self, record: &DirectoryRecord) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, role, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.user_id)
        .bind(record.email.as_str())
        .bind(record.role.code())
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_role(&self, user_id: Uuid) -> AuthResult<Option<Role>> {
        let code: Option<String> =
            sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        match code {
            Some(code) => match Role::from_code(&code) {
                Some(role) => Ok(Some(role)),
                None => {
                    // Unknown code in the directory is the same defect as a
                    // missing row: the caller surfaces it as RoleNotFound.
                    tracing::error!(user_id = %user_id, code = %code, "Unknown role code in directory");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
