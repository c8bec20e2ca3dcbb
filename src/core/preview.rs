use anyhow::Result;
use opencv::core::Mat;
use opencv::highgui;

use crate::capture::Camera;
use crate::shared::constants;
use crate::utils::logger;

/// Show a live preview of the default camera until Escape is pressed.
///
/// Empty reads are reported and skipped; the loop keeps going. wait_key
/// runs every iteration regardless, so it both pumps the window's event
/// queue and keeps Escape responsive while the device is wedged.
pub fn run_preview() -> Result<()> {
    let mut camera = Camera::open(constants::DEFAULT_CAMERA_INDEX)?;
    highgui::named_window(constants::PREVIEW_WINDOW, highgui::WINDOW_AUTOSIZE)?;

    let mut frame = Mat::default();
    loop {
        if camera.read_into(&mut frame)? {
            highgui::imshow(constants::PREVIEW_WINDOW, &frame)?;
        } else {
            println!("Failed to read image from webcam!");
            logger::warn("empty frame from camera");
        }

        if highgui::wait_key(constants::PREVIEW_WAIT_MS)? == constants::KEY_ESCAPE {
            logger::info("escape pressed, closing preview");
            break;
        }
    }

    Ok(())
}
