use anyhow::{anyhow, Result};
use opencv::{core::Mat, prelude::*, videoio};

use crate::utils::logger;

/// A video file opened for sequential frame reads.
pub struct VideoSource {
    capture: videoio::VideoCapture,
    fps: f64,
    width: u32,
    height: u32,
    frame_count: Option<u64>,
}

impl VideoSource {
    /// Open a video file and probe its basic properties.
    ///
    /// CAP_ANY lets OpenCV pick the best backend for the container
    /// (FFmpeg/GStreamer on Linux, AVFoundation on macOS, Media
    /// Foundation on Windows).
    pub fn open(path: &str) -> Result<Self> {
        let mut capture = videoio::VideoCapture::from_file(path, videoio::CAP_ANY)?;

        // Best effort; not every backend honors this
        let _ = capture.set(
            videoio::CAP_PROP_HW_ACCELERATION,
            videoio::VIDEO_ACCELERATION_ANY as f64,
        );

        if !capture.is_opened()? {
            logger::error(&format!("failed to open video {}", path));
            return Err(anyhow!("Failed to open {}", path));
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;

        // Container hint only; some demuxers report 0 or a negative value
        let raw_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?;
        let frame_count = if raw_count >= 1.0 {
            Some(raw_count as u64)
        } else {
            None
        };

        logger::debug(&format!(
            "opened {} ({}x{} @ {:.2} fps, ~{} frames)",
            path,
            width,
            height,
            fps,
            frame_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string())
        ));

        Ok(Self {
            capture,
            fps,
            width,
            height,
            frame_count,
        })
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn frame_width(&self) -> u32 {
        self.width
    }

    pub fn frame_height(&self) -> u32 {
        self.height
    }

    /// Frame count as reported by the container, when it reports one.
    pub fn frame_count_hint(&self) -> Option<u64> {
        self.frame_count
    }

    /// Read the next frame into `frame`, reusing its allocation.
    /// Returns false once the stream is exhausted.
    pub fn read_into(&mut self, frame: &mut Mat) -> Result<bool> {
        if !self.capture.read(frame)? {
            return Ok(false); // EOF
        }
        if frame.empty() {
            return Ok(false);
        }
        Ok(true)
    }
}
