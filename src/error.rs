//! Error types.
//!
//! Roster operations are total and have no error type. Errors only arise
//! at the edges: photo acquisition, photo decoding and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Photo acquisition failure.
///
/// The `Display` text is meant to be shown to the user on the card that
/// requested the photo. A failure never touches the player record.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user or platform refused camera access.
    #[error("Could not access camera. Please ensure camera permissions are granted.")]
    PermissionDenied,

    /// No usable camera device.
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// The stream has no frame dimensions yet.
    #[error("Video not ready yet")]
    NotReady,

    /// A file was picked that is not an image.
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// The image contained no data.
    #[error("Image is empty")]
    EmptyImage,

    /// Reading an image file failed.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure decoding a photo payload back into bytes.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// The payload does not start with `data:` or has no `,` separator.
    #[error("Photo is not a data URL")]
    NotADataUrl,

    /// The data URL is not base64 encoded.
    #[error("Photo data URL is not base64 encoded")]
    NotBase64,

    /// The base64 payload is malformed.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Failure loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `RosterConfig`.
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
