//! Cancellable camera capture.
//!
//! A capture session is a tokio task that opens the camera, waits for the
//! user to press capture, encodes one frame and reports a single
//! `CaptureEvent`. Closing the session (or dropping its handle) cancels it:
//! the stream is stopped and no event is sent.
//!
//! Each session carries an `attempt` number chosen by the caller so late
//! events from an older session can be told apart from the current one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::device::{CameraDevice, CaptureOptions, SnapshotOptions, StreamGuard};
use crate::core::{Photo, PlayerId};
use crate::error::CaptureError;

/// Result of a capture session.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// A frame was captured.
    Captured(Photo),
    /// The device could not be used.
    Failed(CaptureError),
}

/// A capture result addressed to a card.
#[derive(Debug)]
pub struct CaptureEvent {
    /// The card that opened the camera.
    pub player: PlayerId,
    /// Attempt number given to `CaptureSession::start`.
    pub attempt: u64,
    /// What the session produced.
    pub outcome: CaptureOutcome,
}

/// Starts capture sessions against a camera device.
#[derive(Clone)]
pub struct CaptureSession {
    device: Arc<dyn CameraDevice>,
    capture: CaptureOptions,
    snapshot: SnapshotOptions,
}

impl CaptureSession {
    /// Use `device` with default options.
    #[must_use]
    pub fn new(device: Arc<dyn CameraDevice>) -> Self {
        Self {
            device,
            capture: CaptureOptions::default(),
            snapshot: SnapshotOptions::default(),
        }
    }

    /// Set the camera constraints.
    #[must_use]
    pub fn with_capture_options(mut self, options: CaptureOptions) -> Self {
        self.capture = options;
        self
    }

    /// Set how frames are encoded.
    #[must_use]
    pub fn with_snapshot_options(mut self, options: SnapshotOptions) -> Self {
        self.snapshot = options;
        self
    }

    /// Spawn a session for `player`. The outcome, if any, is sent to `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        &self,
        player: PlayerId,
        attempt: u64,
        sink: mpsc::UnboundedSender<CaptureEvent>,
    ) -> CaptureHandle {
        let token = CancellationToken::new();
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();

        let device = self.device.clone();
        let capture = self.capture.clone();
        let snapshot = self.snapshot.clone();
        let task_token = token.clone();

        tracing::debug!(%player, attempt, "starting capture session");

        let task = tokio::spawn(async move {
            let outcome = run_session(device, capture, snapshot, requests_rx, &task_token).await;

            let Some(outcome) = outcome else {
                tracing::debug!(%player, attempt, "capture session cancelled");
                return;
            };
            // Closing the camera after the result was produced still discards it
            if task_token.is_cancelled() {
                tracing::debug!(%player, attempt, "discarding capture result after cancel");
                return;
            }
            if sink.send(CaptureEvent { player, attempt, outcome }).is_err() {
                tracing::debug!(%player, attempt, "capture result receiver gone");
            }
        });

        CaptureHandle {
            player,
            attempt,
            requests: requests_tx,
            token,
            task,
        }
    }
}

async fn run_session(
    device: Arc<dyn CameraDevice>,
    capture: CaptureOptions,
    snapshot: SnapshotOptions,
    mut requests: mpsc::UnboundedReceiver<()>,
    token: &CancellationToken,
) -> Option<CaptureOutcome> {
    let opened = tokio::select! {
        _ = token.cancelled() => return None,
        opened = device.open(&capture) => opened,
    };

    let mut stream = match opened {
        Ok(stream) => StreamGuard::new(stream),
        Err(e) => {
            tracing::warn!(error = %e, "camera open failed");
            return Some(CaptureOutcome::Failed(e));
        }
    };

    loop {
        tokio::select! {
            _ = token.cancelled() => return None,
            request = requests.recv() => {
                // Handle dropped without cancelling
                if request.is_none() {
                    return None;
                }

                match stream.snapshot(&snapshot).await {
                    Ok(image) if image.bytes.is_empty() => {
                        return Some(CaptureOutcome::Failed(CaptureError::EmptyImage));
                    }
                    Ok(image) => {
                        stream.stop();
                        let photo = Photo::encode(&image.mime, &image.bytes);
                        return Some(CaptureOutcome::Captured(photo));
                    }
                    Err(CaptureError::NotReady) => {
                        tracing::warn!("capture requested before the video was ready");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "snapshot failed");
                        return Some(CaptureOutcome::Failed(e));
                    }
                }
            }
        }
    }
}

/// Control handle for a running capture session.
///
/// Dropping the handle cancels the session.
pub struct CaptureHandle {
    player: PlayerId,
    attempt: u64,
    requests: mpsc::UnboundedSender<()>,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl CaptureHandle {
    /// The player the session belongs to.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The attempt number given at start.
    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Ask the session to capture a frame. Returns false if the session
    /// has already ended.
    pub fn capture(&self) -> bool {
        self.requests.send(()).is_ok()
    }

    /// Cancel the session. No event will be delivered afterwards.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if the session task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancel and wait for the task to release the device.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Err(e) = (&mut self.task).await {
            tracing::warn!(error = %e, "capture task ended abnormally");
        }
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

impl std::fmt::Debug for CaptureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureHandle")
            .field("player", &self.player)
            .field("attempt", &self.attempt)
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
