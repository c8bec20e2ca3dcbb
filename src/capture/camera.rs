use anyhow::Result;
use opencv::{core::Mat, prelude::*, videoio};

use crate::utils::logger;

/// A live capture device. Index 0 is the system default camera.
pub struct Camera {
    capture: videoio::VideoCapture,
}

impl Camera {
    pub fn open(index: i32) -> Result<Self> {
        let capture = videoio::VideoCapture::new(index, videoio::CAP_ANY)?;

        if !capture.is_opened()? {
            logger::error(&format!("failed to open camera {}", index));
            anyhow::bail!("Failed to open camera device {}", index);
        }

        logger::debug(&format!("camera {} opened", index));
        Ok(Self { capture })
    }

    /// Grab the next frame into `frame`, reusing its allocation.
    ///
    /// Returns false when the device delivered nothing this iteration.
    /// Cameras do that transiently (warm-up, dropped grabs), so unlike a
    /// file source an empty read is not end-of-stream.
    pub fn read_into(&mut self, frame: &mut Mat) -> Result<bool> {
        let grabbed = self.capture.read(frame)?;
        Ok(grabbed && !frame.empty())
    }
}
