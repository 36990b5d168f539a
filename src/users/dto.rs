use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Request body for user creation. Absent fields deserialize to empty
/// strings so that "absent" and "empty" fail the same presence check.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub phone: String,
}

impl CreateUserRequest {
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.secret = self.secret.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self
    }

    pub fn has_missing_field(&self) -> bool {
        self.name.is_empty()
            || self.email.is_empty()
            || self.secret.is_empty()
            || self.phone.is_empty()
    }
}

/// Request body for partial update. Each field is independently optional;
/// an empty value collapses to `None` so it leaves the stored value alone.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUserRequest {
    pub fn normalized(self) -> Self {
        fn present(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            name: present(self.name),
            email: present(self.email).map(|e| e.to_lowercase()),
            phone: present(self.phone),
        }
    }
}

/// Public part of the user returned by create, get and list.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            created_at: u.created_at,
        }
    }
}

/// Shape returned by the update endpoint: `updated_at` instead of
/// `created_at`.
#[derive(Debug, Serialize)]
pub struct UpdatedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub updated_at: OffsetDateTime,
}

impl From<User> for UpdatedUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UpdatedUser,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "a@x.com".into(),
            phone: "111".into(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn absent_create_fields_deserialize_as_empty() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(req.name, "Ana");
        assert!(req.email.is_empty());
        assert!(req.secret.is_empty());
        assert!(req.phone.is_empty());
        assert!(req.has_missing_field());
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"name":"  ","email":"a@x.com","secret":"s","phone":"111"}"#,
        )
        .unwrap();
        assert!(req.normalized().has_missing_field());
    }

    #[test]
    fn create_normalization_trims_and_lowercases_email() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"name":" Ana ","email":" A@X.Com ","secret":"s3cr3t","phone":" 111 "}"#,
        )
        .unwrap();
        let req = req.normalized();
        assert_eq!(req.name, "Ana");
        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.phone, "111");
        assert!(!req.has_missing_field());
    }

    #[test]
    fn update_empty_fields_collapse_to_none() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"name":"","email":"  ","phone":"222"}"#).unwrap();
        let req = req.normalized();
        assert!(req.name.is_none());
        assert!(req.email.is_none());
        assert_eq!(req.phone.as_deref(), Some("222"));
    }

    #[test]
    fn update_omitted_fields_stay_none() {
        let req: UpdateUserRequest = serde_json::from_str(r#"{"name":"Ana2"}"#).unwrap();
        let req = req.normalized();
        assert_eq!(req.name.as_deref(), Some("Ana2"));
        assert!(req.email.is_none());
        assert!(req.phone.is_none());
    }

    #[test]
    fn public_user_never_contains_a_secret_field() {
        let json = serde_json::to_string(&PublicUser::from(sample_user())).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains("created_at"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn updated_user_carries_updated_at_not_created_at() {
        let json = serde_json::to_string(&UpdatedUser::from(sample_user())).unwrap();
        assert!(json.contains("updated_at"));
        assert!(!json.contains("created_at"));
        assert!(!json.contains("secret"));
    }
}
