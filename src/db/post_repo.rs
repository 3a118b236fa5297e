/// Post database operations
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{MediaDescriptor, Post, PostWithAuthor};

const POST_COLUMNS: &str =
    "id, seq, author_id, content, media_url, media_kind, created_at, updated_at";

/// Projection joining each post with its author display fields and the ids
/// of users who liked it, oldest like first. Feed order is strictly newest
/// first; the insertion sequence breaks creation-time ties.
const POST_VIEW_SELECT: &str = r#"
    SELECT p.id, p.seq, p.author_id, p.content, p.media_url, p.media_kind,
           p.created_at, p.updated_at,
           u.name AS author_name,
           u.profile_image AS author_profile_image,
           COALESCE(
               array_agg(l.user_id ORDER BY l.created_at)
                   FILTER (WHERE l.user_id IS NOT NULL),
               ARRAY[]::uuid[]
           ) AS likes
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN likes l ON l.post_id = p.id
"#;

/// Insert a new post for an author
pub async fn insert_post(
    pool: &PgPool,
    author_id: Uuid,
    content: &str,
    media: Option<&MediaDescriptor>,
) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(&format!(
        r#"
        INSERT INTO posts (author_id, content, media_url, media_kind)
        VALUES ($1, $2, $3, $4)
        RETURNING {POST_COLUMNS}
        "#
    ))
    .bind(author_id)
    .bind(content)
    .bind(media.map(|m| m.url.as_str()))
    .bind(media.map(|m| m.kind))
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // The author FK only trips when the account vanished after the
        // token was issued; that request must fail closed.
        if e.as_database_error()
            .is_some_and(|db| db.is_foreign_key_violation())
        {
            AppError::Unauthenticated("account no longer exists".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(post)
}

/// Fetch a post by id
pub async fn find_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, AppError> {
    let post = sqlx::query_as::<_, Post>(&format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Replace a post's content, and its media when a new attachment was
/// resolved. A single statement keeps the replacement atomic.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    content: &str,
    media: Option<&MediaDescriptor>,
) -> Result<bool, AppError> {
    let result = match media {
        Some(media) => {
            sqlx::query(
                r#"
                UPDATE posts
                SET content = $2, media_url = $3, media_kind = $4, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(post_id)
            .bind(content)
            .bind(&media.url)
            .bind(media.kind)
            .execute(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                UPDATE posts
                SET content = $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(post_id)
            .bind(content)
            .execute(pool)
            .await?
        }
    };

    Ok(result.rows_affected() > 0)
}

/// Permanently remove a post
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Fetch a single post with author projection and likes
pub async fn fetch_view(pool: &PgPool, post_id: Uuid) -> Result<Option<PostWithAuthor>, AppError> {
    let view = sqlx::query_as::<_, PostWithAuthor>(&format!(
        "{POST_VIEW_SELECT} WHERE p.id = $1 GROUP BY p.id, u.id"
    ))
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(view)
}

/// Fetch the whole feed, newest first
pub async fn fetch_feed(pool: &PgPool) -> Result<Vec<PostWithAuthor>, AppError> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(&format!(
        "{POST_VIEW_SELECT} GROUP BY p.id, u.id ORDER BY p.created_at DESC, p.seq DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Fetch one author's posts, newest first
pub async fn fetch_by_author(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Vec<PostWithAuthor>, AppError> {
    let posts = sqlx::query_as::<_, PostWithAuthor>(&format!(
        r#"{POST_VIEW_SELECT}
        WHERE p.author_id = $1
        GROUP BY p.id, u.id
        ORDER BY p.created_at DESC, p.seq DESC"#
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}
