/// Multipart form helpers shared by the upload-accepting handlers
///
/// Uploads are size-capped while streaming so an oversized body is rejected
/// without buffering it whole.
use actix_multipart::Field;
use futures_util::StreamExt;

use crate::error::AppError;
use crate::services::media::{UploadedFile, MAX_UPLOAD_BYTES};

/// Read a text field into a UTF-8 string
pub async fn read_text_field(field: &mut Field) -> Result<String, AppError> {
    let data = read_bytes(field).await?;
    String::from_utf8(data)
        .map_err(|_| AppError::Validation("text field must be valid UTF-8".to_string()))
}

/// Read a file field, capturing its content type and filename
pub async fn read_file_field(field: &mut Field) -> Result<UploadedFile, AppError> {
    let content_type = field
        .content_type()
        .cloned()
        .ok_or_else(|| AppError::Validation("uploaded file is missing a content type".to_string()))?;

    let filename = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string);

    let data = read_bytes(field).await?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    Ok(UploadedFile {
        data,
        content_type,
        filename,
    })
}

/// Drain a field the handler does not care about
pub async fn drain_field(field: &mut Field) -> Result<(), AppError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?;
    }
    Ok(())
}

async fn read_bytes(field: &mut Field) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();

    while let Some(chunk) = field.next().await {
        let chunk =
            chunk.map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?;

        if data.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "upload exceeds the {} byte limit",
                MAX_UPLOAD_BYTES
            )));
        }

        data.extend_from_slice(&chunk);
    }

    Ok(data)
}
