/// Post model and feed projections
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "media_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an upload by its MIME top level; anything that is neither
    /// an image nor a video is not accepted as post media.
    pub fn from_mime(mime: &mime::Mime) -> Option<Self> {
        if mime.type_() == mime::IMAGE {
            Some(MediaKind::Image)
        } else if mime.type_() == mime::VIDEO {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Resolved media attachment: a durable URL plus its kind
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaDescriptor {
    pub url: String,
    pub kind: MediaKind,
}

/// Persisted post record
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub seq: i64,
    pub author_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its author projection and liking user ids
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub seq: i64,
    pub author_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub author_profile_image: String,
    pub likes: Vec<Uuid>,
}

/// Display projection of a post's author
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub name: String,
    pub profile_image: String,
}

/// Post as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub author: AuthorView,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaDescriptor>,
    /// Ids of users who liked this post, oldest like first
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(row: PostWithAuthor) -> Self {
        let media = match (row.media_url, row.media_kind) {
            (Some(url), Some(kind)) => Some(MediaDescriptor { url, kind }),
            _ => None,
        };

        PostResponse {
            id: row.id,
            author: AuthorView {
                id: row.author_id,
                name: row.author_name,
                profile_image: row.author_profile_image,
            },
            content: row.content,
            media,
            likes: row.likes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_kind_from_mime() {
        assert_eq!(MediaKind::from_mime(&mime::IMAGE_PNG), Some(MediaKind::Image));
        assert_eq!(
            MediaKind::from_mime(&"video/mp4".parse().unwrap()),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_mime(&mime::TEXT_PLAIN), None);
        assert_eq!(MediaKind::from_mime(&mime::APPLICATION_OCTET_STREAM), None);
    }

    #[test]
    fn response_drops_partial_media_columns() {
        let row = PostWithAuthor {
            id: Uuid::new_v4(),
            seq: 1,
            author_id: Uuid::new_v4(),
            content: "hello".into(),
            media_url: Some("https://cdn.example.com/x.png".into()),
            media_kind: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            author_name: "Alice".into(),
            author_profile_image: String::new(),
            likes: vec![],
        };

        let resp = PostResponse::from(row);
        assert!(resp.media.is_none());
    }
}
