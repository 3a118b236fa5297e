/// User model and auth/profile request types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Persisted user record. Not serializable: responses go through
/// [`UserResponse`], which has no credential fields at all.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub bio: String,
    pub title: String,
    pub location: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub title: String,
    pub location: String,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            bio: user.bio,
            title: user.title,
            location: user.location,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Canonical form of an email address: trimmed and lowercased.
/// Lookups and inserts both go through this so the unique index catches
/// case- or whitespace-variant duplicates.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@example.com"), "bob@example.com");
    }

    #[test]
    fn register_request_rejects_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            password: "secret123".into(),
            name: "Alice".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn register_request_rejects_short_password() {
        let req = RegisterRequest {
            email: "alice@example.com".into(),
            password: "short".into(),
            name: "Alice".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_profile_allows_clearing_optional_fields() {
        let req = UpdateProfileRequest {
            name: None,
            bio: Some(String::new()),
            title: Some("Engineer".into()),
            location: None,
        };
        assert!(req.validate().is_ok());
    }
}
