use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers::auth::AuthResponse;
use crate::handlers::posts::MessageResponse;
use crate::handlers::users::ProfileImageResponse;
use crate::models::{
    AuthorView, LoginRequest, MediaDescriptor, MediaKind, PostResponse, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};

/// OpenAPI document covering the REST endpoints exposed by the service
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::users::get_profile,
        crate::handlers::users::update_profile,
        crate::handlers::users::upload_profile_image,
        crate::handlers::posts::get_feed,
        crate::handlers::posts::get_user_posts,
        crate::handlers::posts::create_post,
        crate::handlers::posts::update_post,
        crate::handlers::posts::delete_post,
        crate::handlers::posts::like_post,
        crate::handlers::posts::unlike_post
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        UpdateProfileRequest,
        AuthResponse,
        UserResponse,
        PostResponse,
        AuthorView,
        MediaDescriptor,
        MediaKind,
        MessageResponse,
        ProfileImageResponse,
        ErrorBody
    )),
    tags(
        (name = "Auth", description = "Registration & login"),
        (name = "Users", description = "Profile APIs"),
        (name = "Posts", description = "Feed & post mutation APIs")
    )
)]
pub struct ApiDoc;
