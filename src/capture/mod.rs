//! Photo acquisition.
//!
//! - `device`: camera traits and the stream guard
//! - `session`: cancellable capture task producing one `CaptureEvent`
//! - `upload`: portraits from image files
//!
//! Nothing here touches the roster. Results are handed to the caller,
//! which applies them with `Roster::set_photo`.

pub mod device;
pub mod session;
pub mod upload;

pub use device::{
    CameraDevice, CaptureOptions, EncodedImage, Facing, SnapshotOptions, StreamGuard,
    UnavailableCamera, VideoStream,
};
pub use session::{CaptureEvent, CaptureHandle, CaptureOutcome, CaptureSession};
pub use upload::{load_photo_file, mime_for_path, photo_from_bytes};
