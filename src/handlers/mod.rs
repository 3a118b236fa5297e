/// HTTP handlers for Linkup Service
///
/// - `auth`: registration and login
/// - `users`: profile read/update and profile image upload
/// - `posts`: feed listing and the post/like mutation endpoints
pub mod auth;
pub mod forms;
pub mod posts;
pub mod users;

pub use auth::{login, register};
pub use posts::{
    create_post, delete_post, get_feed, get_user_posts, like_post, unlike_post, update_post,
};
pub use users::{get_profile, update_profile, upload_profile_image};
