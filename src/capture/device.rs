//! Camera device seam.
//!
//! A `CameraDevice` opens a `VideoStream`; the stream produces encoded
//! snapshots on demand and must be stopped when no longer needed.
//! `StreamGuard` owns an open stream and stops it exactly once when
//! dropped, so every exit path of a capture releases the device.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Which camera to prefer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Front camera.
    #[default]
    User,
    /// Rear camera.
    Environment,
}

/// Constraints for opening a camera.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Preferred camera.
    pub facing: Facing,
    /// Preferred frame width; devices may pick another.
    pub ideal_width: u32,
    /// Preferred frame height; devices may pick another.
    pub ideal_height: u32,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            facing: Facing::User,
            ideal_width: 640,
            ideal_height: 480,
        }
    }
}

/// How a frame is turned into an image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotOptions {
    /// Flip horizontally so the portrait matches the mirrored preview.
    pub mirror: bool,
    /// Output MIME type.
    pub mime: String,
    /// Encoder quality in `0.0..=1.0`, for lossy formats.
    pub quality: f32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            mirror: true,
            mime: "image/jpeg".to_string(),
            quality: 0.8,
        }
    }
}

/// An encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    /// MIME type of `bytes`.
    pub mime: String,
    /// Encoded image data.
    pub bytes: Vec<u8>,
}

/// A camera that can be opened.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquire the device and start streaming.
    async fn open(&self, options: &CaptureOptions) -> Result<Box<dyn VideoStream>, CaptureError>;
}

/// An open camera stream.
#[async_trait]
pub trait VideoStream: Send {
    /// Current frame size. `(0, 0)` until the first frame arrives.
    fn dimensions(&self) -> (u32, u32);

    /// Encode the current frame.
    async fn snapshot(&mut self, options: &SnapshotOptions) -> Result<EncodedImage, CaptureError>;

    /// Release the device.
    fn stop(&mut self);
}

/// Owns an open stream and stops it on drop.
pub struct StreamGuard {
    stream: Option<Box<dyn VideoStream>>,
}

impl StreamGuard {
    /// Take ownership of an open stream.
    #[must_use]
    pub fn new(stream: Box<dyn VideoStream>) -> Self {
        Self { stream: Some(stream) }
    }

    /// Check if the stream has produced a frame.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        match &self.stream {
            Some(stream) => {
                let (w, h) = stream.dimensions();
                w > 0 && h > 0
            }
            None => false,
        }
    }

    /// Encode the current frame. Fails with `NotReady` if there is none yet.
    pub async fn snapshot(
        &mut self,
        options: &SnapshotOptions,
    ) -> Result<EncodedImage, CaptureError> {
        if !self.is_ready() {
            return Err(CaptureError::NotReady);
        }
        match self.stream.as_mut() {
            Some(stream) => stream.snapshot(options).await,
            None => Err(CaptureError::NotReady),
        }
    }

    /// Stop the stream now. Later calls and the drop are no-ops.
    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("camera stream stopped");
        }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A device that is never available.
///
/// Used where no camera backend exists; every open reports the reason.
#[derive(Clone, Debug)]
pub struct UnavailableCamera {
    reason: String,
}

impl UnavailableCamera {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl Default for UnavailableCamera {
    fn default() -> Self {
        Self::new("no camera backend")
    }
}

#[async_trait]
impl CameraDevice for UnavailableCamera {
    async fn open(&self, _options: &CaptureOptions) -> Result<Box<dyn VideoStream>, CaptureError> {
        Err(CaptureError::DeviceUnavailable(self.reason.clone()))
    }
}
