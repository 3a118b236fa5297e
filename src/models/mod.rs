/// Data models for users and posts
pub mod post;
pub mod user;

pub use post::{AuthorView, MediaDescriptor, MediaKind, Post, PostResponse, PostWithAuthor};
pub use user::{
    normalize_email, LoginRequest, RegisterRequest, UpdateProfileRequest, User, UserResponse,
};
