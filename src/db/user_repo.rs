/// User database operations
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{UpdateProfileRequest, User};

const USER_COLUMNS: &str =
    "id, email, password_hash, name, bio, title, location, profile_image, created_at";

/// Create a new user. Duplicate emails are rejected by the unique index,
/// so two concurrent registrations cannot both succeed.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    name: &str,
) -> Result<User, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, name)
        VALUES ($1, $2, $3)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            AppError::DuplicateEmail
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(user)
}

/// Find user by normalized email
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Find user by id
pub async fn find_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Apply a partial profile update; absent fields keep their value.
/// Returns `None` when the user no longer exists.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &UpdateProfileRequest,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET name = COALESCE($2, name),
            bio = COALESCE($3, bio),
            title = COALESCE($4, title),
            location = COALESCE($5, location)
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(update.name.as_deref())
    .bind(update.bio.as_deref())
    .bind(update.title.as_deref())
    .bind(update.location.as_deref())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Replace the user's profile image URL
pub async fn set_profile_image(
    pool: &PgPool,
    user_id: Uuid,
    image_url: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET profile_image = $2
        WHERE id = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(image_url)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
