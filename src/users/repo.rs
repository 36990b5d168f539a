use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo_types::User;

impl User {
    /// Optimistic existence check before insert; the unique constraint on
    /// `email` remains the authoritative guard against concurrent creators.
    pub async fn email_exists(db: &PgPool, email: &str) -> Result<bool, ApiError> {
        let row = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(row.is_some())
    }

    /// Insert a new user with an already-hashed secret. A unique-constraint
    /// violation on email is classified as a conflict.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        secret_hash: &str,
        phone: &str,
    ) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, secret_hash, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(secret_hash)
        .bind(phone)
        .fetch_one(db)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already registered."))
    }

    pub async fn list(db: &PgPool) -> Result<Vec<User>, ApiError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, created_at, updated_at
            FROM users
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, phone, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Field-level merge: a `None` bind leaves the stored column untouched
    /// via COALESCE. `updated_at` is refreshed on every successful update.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<User>, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($1, name),
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $4
            RETURNING id, name, email, phone, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| ApiError::conflict_on_unique(e, "Email already in use."))
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
