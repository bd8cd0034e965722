//! Live camera seam. The session only needs start/stop and the most recent frame.

use tracing::debug;

use crate::assets::decode::PreparedImage;
use crate::foundation::error::{PlantfitError, PlantfitResult};

pub trait CameraDevice {
    /// Acquire the stream. Starting an active camera is a no-op for callers; the session checks
    /// [`CameraDevice::is_active`] first.
    fn start(&mut self) -> PlantfitResult<()>;

    /// Most recent decoded frame, or `None` while the stream has no frame yet.
    fn latest_frame(&self) -> Option<&PreparedImage>;

    /// Release every track. Stopping an inactive camera does nothing.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// A camera that serves one fixed frame while active. Backs the CLI's `--camera` input.
#[derive(Clone, Debug, Default)]
pub struct StaticFrameCamera {
    frame: Option<PreparedImage>,
    active: bool,
    starts: u32,
}

impl StaticFrameCamera {
    pub fn new(frame: PreparedImage) -> Self {
        Self {
            frame: Some(frame),
            active: false,
            starts: 0,
        }
    }

    /// A camera that starts but never delivers a frame.
    pub fn without_frames() -> Self {
        Self::default()
    }

    /// How many times the stream was acquired.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl CameraDevice for StaticFrameCamera {
    fn start(&mut self) -> PlantfitResult<()> {
        self.active = true;
        self.starts += 1;
        debug!("static camera started");
        Ok(())
    }

    fn latest_frame(&self) -> Option<&PreparedImage> {
        if self.active { self.frame.as_ref() } else { None }
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// No camera present: every start attempt fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCamera;

impl CameraDevice for NoCamera {
    fn start(&mut self) -> PlantfitResult<()> {
        Err(PlantfitError::media("no camera device available"))
    }

    fn latest_frame(&self) -> Option<&PreparedImage> {
        None
    }

    fn stop(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}
