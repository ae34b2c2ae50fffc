//! Portrait payloads.
//!
//! A `Photo` is an opaque data URL (`data:<mime>;base64,<payload>`). The
//! roster never inspects it; validation of uploads happens in
//! `crate::capture` before a payload is built.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::PhotoError;

/// Opaque portrait payload.
///
/// Cheap to clone: the data URL is shared behind an `Arc`, so snapshots
/// holding the same portrait never copy the image.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(Arc<str>);

impl Photo {
    /// Wrap an existing data URL without checking it.
    #[must_use]
    pub fn from_data_url(url: impl Into<Arc<str>>) -> Self {
        Self(url.into())
    }

    /// Build a data URL from raw image bytes.
    #[must_use]
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)).into())
    }

    /// The data URL.
    #[must_use]
    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Size of the data URL in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// MIME type declared by the data URL, if it has the expected shape.
    #[must_use]
    pub fn mime(&self) -> Option<&str> {
        let (header, _) = self.split()?;
        header.strip_suffix(";base64")
    }

    /// Decode the image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, PhotoError> {
        let (header, payload) = self.split().ok_or(PhotoError::NotADataUrl)?;
        if !header.ends_with(";base64") {
            return Err(PhotoError::NotBase64);
        }
        Ok(STANDARD.decode(payload)?)
    }

    fn split(&self) -> Option<(&str, &str)> {
        self.0.strip_prefix("data:")?.split_once(',')
    }
}

impl std::fmt::Display for Photo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mime() {
            Some(mime) => write!(f, "{} ({} bytes)", mime, self.len()),
            None => write!(f, "photo ({} bytes)", self.len()),
        }
    }
}
