//! Test camera shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use realm_tracker::capture::{
    CameraDevice, CaptureOptions, EncodedImage, SnapshotOptions, VideoStream,
};
use realm_tracker::CaptureError;

/// Counters observed by tests.
#[derive(Debug, Default)]
pub struct CameraStats {
    opens: AtomicUsize,
    stops: AtomicUsize,
    snapshots: AtomicUsize,
}

impl CameraStats {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn snapshots(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

/// Scriptable camera.
pub struct FakeCamera {
    image: Vec<u8>,
    deny: bool,
    warmup: usize,
    gate: Option<Arc<Notify>>,
    stats: Arc<CameraStats>,
}

impl FakeCamera {
    /// Opens immediately and returns `image` on every snapshot.
    pub fn ready(image: &[u8]) -> Self {
        Self {
            image: image.to_vec(),
            deny: false,
            warmup: 0,
            gate: None,
            stats: Arc::new(CameraStats::default()),
        }
    }

    /// Refuses access.
    pub fn denied() -> Self {
        Self { deny: true, ..Self::ready(b"") }
    }

    /// Reports no frame for the first `checks` readiness checks.
    pub fn with_warmup(mut self, checks: usize) -> Self {
        self.warmup = checks;
        self
    }

    /// Blocks `open` until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn stats(&self) -> Arc<CameraStats> {
        self.stats.clone()
    }
}

#[async_trait]
impl CameraDevice for FakeCamera {
    async fn open(&self, _options: &CaptureOptions) -> Result<Box<dyn VideoStream>, CaptureError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.deny {
            return Err(CaptureError::PermissionDenied);
        }
        self.stats.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeStream {
            image: self.image.clone(),
            warmup: AtomicUsize::new(self.warmup),
            stats: self.stats.clone(),
        }))
    }
}

struct FakeStream {
    image: Vec<u8>,
    warmup: AtomicUsize,
    stats: Arc<CameraStats>,
}

#[async_trait]
impl VideoStream for FakeStream {
    fn dimensions(&self) -> (u32, u32) {
        let remaining = self.warmup.load(Ordering::SeqCst);
        if remaining > 0 {
            self.warmup.store(remaining - 1, Ordering::SeqCst);
            (0, 0)
        } else {
            (640, 480)
        }
    }

    async fn snapshot(&mut self, options: &SnapshotOptions) -> Result<EncodedImage, CaptureError> {
        self.stats.snapshots.fetch_add(1, Ordering::SeqCst);
        Ok(EncodedImage { mime: options.mime.clone(), bytes: self.image.clone() })
    }

    fn stop(&mut self) {
        self.stats.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Yield to spawned tasks until `done` holds, failing after a second.
pub async fn wait_until(mut done: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !done() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}
