//! PostgreSQL User Directory Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::{Email, Role};
use crate::error::AuthResult;
use kernel::id::IdentityId;
use platform::password::PasswordHash;

/// PostgreSQL-backed user directory
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const IDENTITY_COLUMNS: &str = r#"
    identity_id,
    email,
    password_hash,
    role,
    display_name,
    refresh_token,
    last_login_at,
    created_at,
    updated_at
"#;

impl UserDirectory for PgUserDirectory {
    async fn email_taken(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM identities WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, identity: &Identity) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO identities (
                identity_id,
                email,
                password_hash,
                role,
                display_name,
                refresh_token,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(identity.identity_id.as_uuid())
        .bind(identity.email.as_str())
        .bind(identity.password_hash.as_phc_string())
        .bind(identity.role.id())
        .bind(identity.display_name.as_deref())
        .bind(identity.refresh_token.as_deref())
        .bind(identity.last_login_at)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, identity_id: &IdentityId) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE identity_id = $1"
        ))
        .bind(identity_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM identities WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_identity()).transpose()
    }

    async fn store_refresh_token(
        &self,
        identity_id: &IdentityId,
        refresh_token: &str,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE identities SET refresh_token = $2, updated_at = NOW() WHERE identity_id = $1",
        )
        .bind(identity_id.as_uuid())
        .bind(refresh_token)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn swap_refresh_token(
        &self,
        identity_id: &IdentityId,
        current: &str,
        next: &str,
    ) -> AuthResult<bool> {
        // Compare-and-swap on the stored token: the WHERE clause makes the
        // rotation atomic, so a concurrent refresh of the same session
        // updates zero rows and loses.
        let updated = sqlx::query(
            r#"
            UPDATE identities
            SET refresh_token = $3, updated_at = NOW()
            WHERE identity_id = $1 AND refresh_token = $2
            "#,
        )
        .bind(identity_id.as_uuid())
        .bind(current)
        .bind(next)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn clear_refresh_token(&self, identity_id: &IdentityId) -> AuthResult<()> {
        sqlx::query(
            "UPDATE identities SET refresh_token = NULL, updated_at = NOW() WHERE identity_id = $1",
        )
        .bind(identity_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn store_password_hash(
        &self,
        identity_id: &IdentityId,
        password_hash: &PasswordHash,
    ) -> AuthResult<()> {
        sqlx::query(
            "UPDATE identities SET password_hash = $2, updated_at = NOW() WHERE identity_id = $1",
        )
        .bind(identity_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_login(&self, identity_id: &IdentityId) -> AuthResult<()> {
        sqlx::query(
            "UPDATE identities SET last_login_at = NOW(), updated_at = NOW() WHERE identity_id = $1",
        )
        .bind(identity_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct IdentityRow {
    identity_id: Uuid,
    email: String,
    password_hash: String,
    role: i16,
    display_name: Option<String>,
    refresh_token: Option<String>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IdentityRow {
    fn into_identity(self) -> AuthResult<Identity> {
        let password_hash = PasswordHash::from_phc_string(self.password_hash)
            .map_err(|e| crate::error::AuthError::Internal(e.to_string()))?;

        Ok(Identity {
            identity_id: IdentityId::from_uuid(self.identity_id),
            email: Email::from_directory(self.email),
            password_hash,
            // Unknown role ids fall back to the least-privileged role.
            role: Role::from_id(self.role).unwrap_or_default(),
            display_name: self.display_name,
            refresh_token: self.refresh_token,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
