/// Business logic layer
pub mod media;
pub mod posts;

pub use media::{MediaStorage, UploadedFile, MAX_UPLOAD_BYTES};
pub use posts::PostService;
