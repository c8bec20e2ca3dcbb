use anyhow::{Context, Result};
use opencv::core::{Mat, Vector};
use opencv::imgcodecs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::capture::VideoSource;
use crate::shared::constants;
use crate::utils::{file_utils, logger};

/// Dump every frame of `video_path` into `output_dir` as numbered bitmaps
/// (`0.bmp`, `1.bmp`, ...), in arrival order, until the stream is exhausted
/// or `running` is cleared. Returns the number of frames written.
///
/// The video is opened before the output directory is touched, so a bad
/// input path never creates the directory. Reruns overwrite same-indexed
/// files; frames already on disk are kept when a later step fails.
pub fn extract_frames(video_path: &str, output_dir: &str, running: &AtomicBool) -> Result<u64> {
    let mut source = VideoSource::open(video_path)?;

    let out_dir = Path::new(output_dir);
    if file_utils::ensure_dir(out_dir)? {
        println!("Folder {} created", output_dir);
    }

    logger::info(&format!(
        "extracting {} ({}x{} @ {:.2} fps, ~{} frames) into {}",
        video_path,
        source.frame_width(),
        source.frame_height(),
        source.fps(),
        source
            .frame_count_hint()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string()),
        output_dir
    ));

    let mut frame = Mat::default();
    let mut index: u64 = 0;

    while running.load(Ordering::SeqCst) && source.read_into(&mut frame)? {
        write_frame(out_dir, index, &frame)?;
        index += 1;

        if index % constants::PROGRESS_EVERY == 0 {
            logger::debug(&format!("{} frames written", index));
        }
    }

    if !running.load(Ordering::SeqCst) {
        logger::info("extraction interrupted, keeping frames written so far");
    }

    println!("Extracted {} frames to {}", index, output_dir);
    logger::info(&format!("extracted {} frames from {}", index, video_path));
    Ok(index)
}

fn write_frame(dir: &Path, index: u64, frame: &Mat) -> Result<()> {
    let path = file_utils::frame_path(dir, index);
    let path_str = path
        .to_str()
        .with_context(|| format!("Frame path is not valid UTF-8: {}", path.display()))?;

    let written = imgcodecs::imwrite(path_str, frame, &Vector::new())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    if !written {
        anyhow::bail!("Failed to encode {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, Size, CV_8UC3};
    use opencv::prelude::*;
    use opencv::videoio::VideoWriter;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;

    fn write_fixture(path: &Path, frames: i32) {
        let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G').unwrap();
        let mut writer = VideoWriter::new(
            path.to_str().unwrap(),
            fourcc,
            10.0,
            Size::new(64, 48),
            true,
        )
        .unwrap();
        assert!(writer.is_opened().unwrap());

        for i in 0..frames {
            let shade = f64::from((i * 40) % 256);
            let frame = Mat::new_rows_cols_with_default(
                48,
                64,
                CV_8UC3,
                Scalar::new(shade, 200.0, 255.0 - shade, 0.0),
            )
            .unwrap();
            writer.write(&frame).unwrap();
        }
        writer.release().unwrap();
    }

    fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn bmp_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_extract_writes_every_frame_in_order() {
        let tmp = fresh_dir("vidcap_test_extract_all");
        let video = tmp.join("fixture.avi");
        write_fixture(&video, 5);

        let out = tmp.join("frames");
        let running = AtomicBool::new(true);
        let count =
            extract_frames(video.to_str().unwrap(), out.to_str().unwrap(), &running).unwrap();
        assert_eq!(count, 5);

        let mut expected: Vec<String> = (0..5).map(|i| format!("{}.bmp", i)).collect();
        expected.sort();
        assert_eq!(bmp_names(&out), expected);

        // Every file decodes back to a frame with the source dimensions
        for i in 0..5 {
            let path = out.join(format!("{}.bmp", i));
            let img =
                imgcodecs::imread(path.to_str().unwrap(), imgcodecs::IMREAD_COLOR).unwrap();
            assert!(!img.empty());
            assert_eq!(img.cols(), 64);
            assert_eq!(img.rows(), 48);
        }
    }

    #[test]
    fn test_extract_creates_missing_output_dir() {
        let tmp = fresh_dir("vidcap_test_extract_mkdir");
        let video = tmp.join("fixture.avi");
        write_fixture(&video, 2);

        let out = tmp.join("new").join("frames");
        assert!(!out.exists());

        let running = AtomicBool::new(true);
        let count =
            extract_frames(video.to_str().unwrap(), out.to_str().unwrap(), &running).unwrap();
        assert_eq!(count, 2);
        assert!(out.is_dir());
    }

    #[test]
    fn test_rerun_overwrites_without_error() {
        let tmp = fresh_dir("vidcap_test_extract_rerun");
        let video = tmp.join("fixture.avi");
        write_fixture(&video, 3);

        let out = tmp.join("frames");
        let running = AtomicBool::new(true);
        let video_str = video.to_str().unwrap();
        let out_str = out.to_str().unwrap();

        assert_eq!(extract_frames(video_str, out_str, &running).unwrap(), 3);
        assert_eq!(extract_frames(video_str, out_str, &running).unwrap(), 3);
        assert_eq!(bmp_names(&out).len(), 3);
    }

    #[test]
    fn test_missing_video_writes_nothing() {
        let tmp = fresh_dir("vidcap_test_extract_missing");
        let out = tmp.join("frames");

        let running = AtomicBool::new(true);
        let missing = tmp.join("no_such_video.mp4");
        assert!(
            extract_frames(missing.to_str().unwrap(), out.to_str().unwrap(), &running).is_err()
        );

        // The video is opened first, so the directory was never created
        assert!(!out.exists());
    }

    #[test]
    fn test_corrupt_video_writes_nothing() {
        let tmp = fresh_dir("vidcap_test_extract_corrupt");
        let garbage = tmp.join("garbage.mp4");
        let mut file = File::create(&garbage).unwrap();
        file.write_all(b"this is not a video container").unwrap();

        let out = tmp.join("frames");
        let running = AtomicBool::new(true);
        assert!(
            extract_frames(garbage.to_str().unwrap(), out.to_str().unwrap(), &running).is_err()
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_uncreatable_output_dir_fails() {
        let tmp = fresh_dir("vidcap_test_extract_blocked");
        let video = tmp.join("fixture.avi");
        write_fixture(&video, 1);

        let blocker = tmp.join("blocker");
        File::create(&blocker).unwrap();

        let out = blocker.join("frames");
        let running = AtomicBool::new(true);
        assert!(
            extract_frames(video.to_str().unwrap(), out.to_str().unwrap(), &running).is_err()
        );
    }

    #[test]
    fn test_cleared_stop_flag_writes_nothing() {
        let tmp = fresh_dir("vidcap_test_extract_stopped");
        let video = tmp.join("fixture.avi");
        write_fixture(&video, 3);

        let out = tmp.join("frames");
        let running = AtomicBool::new(false);
        let count =
            extract_frames(video.to_str().unwrap(), out.to_str().unwrap(), &running).unwrap();
        assert_eq!(count, 0);
        assert!(bmp_names(&out).is_empty());
    }
}
