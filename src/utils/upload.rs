use std::io::ErrorKind;
use std::path::Path;

use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, AppResult};

/// URL prefix under which stored images are addressed.
pub const UPLOAD_URL_PREFIX: &str = "/uploads";

/// Attempts at a free name before giving up on an upload
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Longest kept tail of a client file name, so the stored path fits `image_url`
const MAX_CLEAN_NAME_LEN: usize = 200;

/// Build the on-disk name `<millis>_<name>` for an uploaded file.
///
/// Only the final path component of the client-supplied name is kept and any
/// character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn stored_file_name(timestamp_millis: i64, original: &str) -> String {
    format!("{}_{}", timestamp_millis, clean_name(original))
}

/// Name used for retry `attempt` when `<millis>_<name>` is already taken.
pub fn retry_file_name(timestamp_millis: i64, attempt: u32, original: &str) -> String {
    format!("{}-{}_{}", timestamp_millis, attempt, clean_name(original))
}

fn clean_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let chars: Vec<char> = base.chars().collect();
    let tail = &chars[chars.len().saturating_sub(MAX_CLEAN_NAME_LEN)..];

    let cleaned: String = tail
        .iter()
        .map(|&c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return "upload".to_string();
    }
    cleaned
}

/// Write an uploaded image into `upload_dir` and return its relative URL.
///
/// Files are created exclusively; an upload never replaces an existing file.
pub async fn store_image(upload_dir: &str, original_name: &str, bytes: &[u8]) -> AppResult<String> {
    let millis = Utc::now().timestamp_millis();
    let dir = Path::new(upload_dir);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {}", e)))?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let file_name = match attempt {
            0 => stored_file_name(millis, original_name),
            n => retry_file_name(millis, n, original_name),
        };

        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(dir.join(&file_name))
            .await;

        let mut file = match opened {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(AppError::Internal(format!("Failed to store upload: {}", e))),
        };

        file.write_all(bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

        tracing::debug!(file = %file_name, size = bytes.len(), "Stored package image");
        return Ok(format!("{}/{}", UPLOAD_URL_PREFIX, file_name));
    }

    Err(AppError::Internal(format!(
        "No free upload name for '{}' after {} attempts",
        original_name, MAX_NAME_ATTEMPTS
    )))
}

/// Turn a stored image path into an absolute URL rooted at `backend_url`.
pub fn absolute_image_url(backend_url: &str, image_url: &str) -> String {
    if image_url.starts_with("http://") || image_url.starts_with("https://") {
        return image_url.to_string();
    }

    format!(
        "{}/{}",
        backend_url.trim_end_matches('/'),
        image_url.trim_start_matches('/')
    )
}
