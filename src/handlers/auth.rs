/// Authentication handlers
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

use crate::db::user_repo;
use crate::error::{AppError, ErrorBody};
use crate::metrics;
use crate::models::{normalize_email, LoginRequest, RegisterRequest, UserResponse};
use crate::security::{jwt, password};

/// Session token plus the authenticated user
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Register endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Duplicate email or invalid input", body = ErrorBody)
    )
)]
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    metrics::inc_register_requests();

    payload.validate()?;

    let email = normalize_email(&payload.email);
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let password_hash = password::hash_password(&payload.password)?;

    let user = user_repo::create_user(pool.get_ref(), &email, &password_hash, name).await?;

    let token = jwt::issue_token(user.id)?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Login endpoint handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in", body = AuthResponse),
        (status = 400, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    pool: web::Data<PgPool>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    metrics::inc_login_requests();

    payload.validate()?;

    let email = normalize_email(&payload.email);

    let user = user_repo::find_by_email(pool.get_ref(), &email)
        .await?
        .ok_or_else(|| {
            metrics::inc_login_failures();
            AppError::InvalidCredentials
        })?;

    password::verify_password(&payload.password, &user.password_hash).map_err(|e| {
        metrics::inc_login_failures();
        e
    })?;

    let token = jwt::issue_token(user.id)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: user.into(),
    }))
}
