use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use vidcap::core::extractor;
use vidcap::utils::logger;

/// Extract every frame of a video into numbered bitmap files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Video file to read frames from
    video: String,

    /// Directory the numbered frames are written into (created if missing)
    output_dir: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Error registering Ctrl-C handler")?;

    extractor::extract_frames(&cli.video, &cli.output_dir, &running)?;
    Ok(())
}
