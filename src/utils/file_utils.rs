use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants;

/// Make sure `dir` exists, creating it (and missing parents) if needed.
/// Returns true when the directory had to be created.
pub fn ensure_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    Ok(true)
}

/// Path of the numbered frame file inside `dir`: `0.bmp`, `1.bmp`, ...
pub fn frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("{}.{}", index, constants::FRAME_EXT))
}
