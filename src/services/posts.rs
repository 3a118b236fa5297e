/// Post service - the mutation rules around the post store
///
/// Every mutating operation re-fetches the post by id before evaluating its
/// ownership or like-state predicate, so a decision is never made against a
/// record read earlier in the request. Like/unlike then delegate the actual
/// state transition to the store's conditional insert/delete.
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, post_repo, user_repo};
use crate::error::AppError;
use crate::models::{MediaDescriptor, PostResponse};

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post owned by the caller
    pub async fn create_post(
        &self,
        author_id: Uuid,
        content: &str,
        media: Option<MediaDescriptor>,
    ) -> Result<PostResponse, AppError> {
        let post = post_repo::insert_post(&self.pool, author_id, content, media.as_ref()).await?;

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");

        self.view(post.id).await
    }

    /// Replace a post's content (and media, when a new attachment is given).
    /// Only the author may edit; author and likes are never touched.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        caller_id: Uuid,
        content: &str,
        media: Option<MediaDescriptor>,
    ) -> Result<PostResponse, AppError> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.author_id != caller_id {
            return Err(AppError::Forbidden(
                "only the author can edit this post".to_string(),
            ));
        }

        if !post_repo::update_post(&self.pool, post_id, content, media.as_ref()).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        self.view(post_id).await
    }

    /// Permanently delete a post. Only the author may delete.
    pub async fn delete_post(&self, post_id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.author_id != caller_id {
            return Err(AppError::Forbidden(
                "only the author can delete this post".to_string(),
            ));
        }

        if !post_repo::delete_post(&self.pool, post_id).await? {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        tracing::info!(post_id = %post_id, author_id = %caller_id, "post deleted");

        Ok(())
    }

    /// Add the caller's like. A repeat like is an error, not a no-op.
    pub async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<PostResponse, AppError> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if !like_repo::insert_like(&self.pool, post.id, user_id).await? {
            return Err(AppError::AlreadyLiked);
        }

        self.view(post_id).await
    }

    /// Remove the caller's like. Unliking a post that was not liked is an
    /// error, not a no-op.
    pub async fn unlike_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<PostResponse, AppError> {
        let post = post_repo::find_by_id(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if !like_repo::delete_like(&self.pool, post.id, user_id).await? {
            return Err(AppError::NotLiked);
        }

        self.view(post_id).await
    }

    /// The whole feed, newest first
    pub async fn feed(&self) -> Result<Vec<PostResponse>, AppError> {
        let posts = post_repo::fetch_feed(&self.pool).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// One author's posts, newest first. The author must exist.
    pub async fn posts_by_author(&self, author_id: Uuid) -> Result<Vec<PostResponse>, AppError> {
        user_repo::find_by_id(&self.pool, author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let posts = post_repo::fetch_by_author(&self.pool, author_id).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// Re-read a post's response projection after a mutation
    async fn view(&self, post_id: Uuid) -> Result<PostResponse, AppError> {
        let view = post_repo::fetch_view(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        Ok(PostResponse::from(view))
    }
}
