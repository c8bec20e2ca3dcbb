use anyhow::Result;
use clap::Parser;

use vidcap::core::preview;
use vidcap::utils::logger;

/// Live preview of the default webcam. Press Escape to quit.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    let _ = Cli::parse();
    logger::init();

    preview::run_preview()
}
