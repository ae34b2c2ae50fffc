//! Portrait upload from image files.

use std::path::Path;

use crate::core::Photo;
use crate::error::CaptureError;

/// Guess an image MIME type from a file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

/// Build a photo from image bytes.
///
/// Rejects non-image MIME types and empty payloads.
pub fn photo_from_bytes(mime: &str, bytes: &[u8]) -> Result<Photo, CaptureError> {
    if !mime.starts_with("image/") {
        return Err(CaptureError::UnsupportedMedia(mime.to_string()));
    }
    if bytes.is_empty() {
        return Err(CaptureError::EmptyImage);
    }
    Ok(Photo::encode(mime, bytes))
}

/// Read an image file into a photo.
pub async fn load_photo_file(path: impl AsRef<Path>) -> Result<Photo, CaptureError> {
    let path = path.as_ref();
    let mime = mime_for_path(path)
        .ok_or_else(|| CaptureError::UnsupportedMedia(path.display().to_string()))?;

    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), mime, size = bytes.len(), "loaded photo file");
    photo_from_bytes(mime, &bytes)
}
