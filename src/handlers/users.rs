/// Profile handlers
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, ErrorBody};
use crate::handlers::forms;
use crate::middleware::UserId;
use crate::models::{UpdateProfileRequest, UserResponse};
use crate::services::MediaStorage;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageResponse {
    pub profile_image: String,
}

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/v1/users/profile",
    tag = "Users",
    responses(
        (status = 200, description = "Caller's profile", body = UserResponse),
        (status = 401, description = "Unauthenticated", body = ErrorBody)
    )
)]
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let profile = user_repo::find_by_id(pool.get_ref(), user.0)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("account no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(profile)))
}

/// Update the caller's profile fields
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody)
    )
)]
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = user_repo::update_profile(pool.get_ref(), user.0, &payload)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("account no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// Upload a new profile image (multipart field `image`)
#[utoipa::path(
    post,
    path = "/api/v1/users/profile/image",
    tag = "Users",
    responses(
        (status = 200, description = "New profile image URL", body = ProfileImageResponse),
        (status = 400, description = "Missing or unsupported file", body = ErrorBody),
        (status = 401, description = "Unauthenticated", body = ErrorBody),
        (status = 502, description = "Media storage failure", body = ErrorBody)
    )
)]
pub async fn upload_profile_image(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<MediaStorage>>,
    user: UserId,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let mut image = None;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?;

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => image = Some(forms::read_file_field(&mut field).await?),
            _ => forms::drain_field(&mut field).await?,
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("no file uploaded".to_string()))?;

    if image.content_type.type_() != mime::IMAGE {
        return Err(AppError::Validation(format!(
            "profile image must be an image, got {}",
            image.content_type
        )));
    }

    let descriptor = storage.resolve(image).await?;

    user_repo::set_profile_image(pool.get_ref(), user.0, &descriptor.url)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("account no longer exists".to_string()))?;

    tracing::info!(user_id = %user.0, "profile image updated");

    Ok(HttpResponse::Ok().json(ProfileImageResponse {
        profile_image: descriptor.url,
    }))
}
