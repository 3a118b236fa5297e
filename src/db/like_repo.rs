/// Like database operations
///
/// Like and unlike are conditional set mutations evaluated by the store
/// itself: the insert relies on the `(post_id, user_id)` unique constraint
/// and the delete on its own row match, so two concurrent requests from the
/// same user resolve to exactly one state transition with no application
/// read-modify-write.
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

/// Add a user's like to a post if absent. Returns `false` when the like
/// was already present.
pub async fn insert_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (post_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, user_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await
    .map_err(|e| {
        let fk_constraint = e
            .as_database_error()
            .filter(|db| db.is_foreign_key_violation())
            .and_then(|db| db.constraint())
            .map(str::to_string);

        match fk_constraint.as_deref() {
            // The liker's account vanished after the token was issued.
            Some("likes_user_id_fkey") => {
                AppError::Unauthenticated("account no longer exists".to_string())
            }
            // The post was deleted between the existence check and the insert.
            Some(_) => AppError::NotFound("post not found".to_string()),
            None => AppError::Database(e),
        }
    })?;

    Ok(result.rows_affected() > 0)
}

/// Remove a user's like from a post if present. Returns `false` when there
/// was no like to remove.
pub async fn delete_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE post_id = $1 AND user_id = $2
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
