use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
///
/// The `secret_hash` column is intentionally absent: no read path ever
/// selects it, so the hash cannot leak through a response by accident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
