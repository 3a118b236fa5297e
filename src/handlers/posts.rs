/// Post handlers - HTTP endpoints for the feed and post mutations
///
/// Create and update accept `multipart/form-data` with a `content` text
/// field and an optional `media` file field. Media is type- and
/// size-checked here at the boundary, then resolved to a durable URL
/// before the mutation runs.
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, ErrorBody};
use crate::handlers::forms;
use crate::middleware::UserId;
use crate::models::{MediaDescriptor, MediaKind, PostResponse};
use crate::services::{MediaStorage, PostService, UploadedFile};

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Parsed create/update form
struct PostForm {
    content: Option<String>,
    media: Option<UploadedFile>,
}

async fn read_post_form(payload: &mut Multipart) -> Result<PostForm, AppError> {
    let mut form = PostForm {
        content: None,
        media: None,
    };

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?;

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("content") => form.content = Some(forms::read_text_field(&mut field).await?),
            Some("media") => {
                let file = forms::read_file_field(&mut field).await?;
                if MediaKind::from_mime(&file.content_type).is_none() {
                    return Err(AppError::Validation(format!(
                        "unsupported media type: {}",
                        file.content_type
                    )));
                }
                form.media = Some(file);
            }
            _ => forms::drain_field(&mut field).await?,
        }
    }

    Ok(form)
}

fn required_content(content: Option<&str>) -> Result<String, AppError> {
    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(AppError::Validation("content is required".to_string()));
    }
    Ok(content.to_string())
}

async fn resolve_media(
    storage: &MediaStorage,
    media: Option<UploadedFile>,
) -> Result<Option<MediaDescriptor>, AppError> {
    match media {
        Some(file) => Ok(Some(storage.resolve(file).await?)),
        None => Ok(None),
    }
}

/// Get the feed, newest first
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    tag = "Posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [PostResponse]),
        (status = 401, description = "Unauthenticated", body = ErrorBody)
    )
)]
pub async fn get_feed(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let posts = PostService::new(pool.get_ref().clone()).feed().await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get one author's posts, newest first
#[utoipa::path(
    get,
    path = "/api/v1/posts/user/{user_id}",
    tag = "Posts",
    params(("user_id" = Uuid, Path, description = "Author user id")),
    responses(
        (status = 200, description = "Author's posts, newest first", body = [PostResponse]),
        (status = 404, description = "Author does not exist", body = ErrorBody)
    )
)]
pub async fn get_user_posts(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let posts = PostService::new(pool.get_ref().clone())
        .posts_by_author(*path)
        .await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    tag = "Posts",
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Missing content or unsupported media", body = ErrorBody),
        (status = 502, description = "Media storage failure", body = ErrorBody)
    )
)]
pub async fn create_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<MediaStorage>>,
    user: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_post_form(&mut payload).await?;
    let content = required_content(form.content.as_deref())?;

    let media = resolve_media(storage.get_ref(), form.media).await?;

    let post = PostService::new(pool.get_ref().clone())
        .create_post(user.0, &content, media)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Edit a post (author only)
#[utoipa::path(
    put,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 403, description = "Caller is not the author", body = ErrorBody),
        (status = 404, description = "Post does not exist", body = ErrorBody)
    )
)]
pub async fn update_post(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<MediaStorage>>,
    path: web::Path<Uuid>,
    user: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_post_form(&mut payload).await?;
    let content = required_content(form.content.as_deref())?;

    let media = resolve_media(storage.get_ref(), form.media).await?;

    let post = PostService::new(pool.get_ref().clone())
        .update_post(*path, user.0, &content, media)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post (author only)
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 403, description = "Caller is not the author", body = ErrorBody),
        (status = 404, description = "Post does not exist", body = ErrorBody)
    )
)]
pub async fn delete_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    PostService::new(pool.get_ref().clone())
        .delete_post(*path, user.0)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

/// Like a post
#[utoipa::path(
    post,
    path = "/api/v1/posts/{post_id}/like",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Already liked", body = ErrorBody),
        (status = 404, description = "Post does not exist", body = ErrorBody)
    )
)]
pub async fn like_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post = PostService::new(pool.get_ref().clone())
        .like_post(*path, user.0)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Remove a like from a post
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{post_id}/like",
    tag = "Posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Not liked", body = ErrorBody),
        (status = 404, description = "Post does not exist", body = ErrorBody)
    )
)]
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post = PostService::new(pool.get_ref().clone())
        .unlike_post(*path, user.0)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}
