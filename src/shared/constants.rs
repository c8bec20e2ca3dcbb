pub const APP_NAME: &str = "vidcap";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Index of the system default camera.
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Extension of extracted frame files. imwrite picks the encoder from it.
pub const FRAME_EXT: &str = "bmp";

/// Title of the live preview window.
pub const PREVIEW_WINDOW: &str = "Webcam";

/// How long wait_key blocks per preview iteration, in milliseconds.
pub const PREVIEW_WAIT_MS: i32 = 1;

/// Keycode wait_key reports for the Escape key.
pub const KEY_ESCAPE: i32 = 27;

/// Emit a debug-log progress line every this many extracted frames.
pub const PROGRESS_EVERY: u64 = 100;
