/// Media storage backed by S3-compatible object storage
///
/// The service hands uploaded bytes to the object store in a single
/// synchronous call and gets back a durable public URL. A failed upload
/// fails the whole request; nothing is retried.
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use crate::config::MediaConfig;
use crate::error::AppError;
use crate::models::{MediaDescriptor, MediaKind};

/// Maximum accepted upload size (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// A file read out of a multipart request
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    pub content_type: mime::Mime,
    pub filename: Option<String>,
}

pub struct MediaStorage {
    client: Client,
    bucket: String,
    region: String,
    public_base_url: Option<String>,
}

impl MediaStorage {
    /// Build the S3 client from configuration
    pub async fn from_config(config: &MediaConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            None,
            None,
            "linkup-service",
        );

        let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if let Some(endpoint) = &config.endpoint {
            if !endpoint.trim().is_empty() {
                builder = builder.endpoint_url(endpoint);
            }
        }

        MediaStorage {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Store an upload and return its durable URL and media kind
    pub async fn resolve(&self, file: UploadedFile) -> Result<MediaDescriptor, AppError> {
        let kind = MediaKind::from_mime(&file.content_type).ok_or_else(|| {
            AppError::Validation(format!("unsupported media type: {}", file.content_type))
        })?;

        let key = object_key(file.filename.as_deref());
        let content_type = file.content_type.to_string();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(file.data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::MediaUpload(e.to_string()))?;

        Ok(MediaDescriptor {
            url: self.public_url(&key),
            kind,
        })
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

/// Object keys are random-prefixed so re-uploads of the same filename never
/// collide or overwrite.
fn object_key(filename: Option<&str>) -> String {
    let name = filename
        .map(sanitize_filename)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "upload".to_string());

    format!("media/{}-{}", Uuid::new_v4(), name)
}

fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_is_unique_per_upload() {
        let a = object_key(Some("cv.pdf"));
        let b = object_key(Some("cv.pdf"));
        assert_ne!(a, b);
        assert!(a.starts_with("media/"));
        assert!(a.ends_with("-cv.pdf"));
    }

    #[test]
    fn object_key_sanitizes_hostile_names() {
        let key = object_key(Some("../../etc/passwd"));
        assert!(!key.contains("/etc/"));
        assert!(key.starts_with("media/"));
    }

    #[test]
    fn object_key_falls_back_without_filename() {
        assert!(object_key(None).ends_with("-upload"));
    }
}
