#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod input;

use anyhow::{Context, Result};
use clap::Parser;
use input::FrameInput;
use log::info;
use spark_navigation::{NavigationConfig, NavigationGuide};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Turns per-frame detections into navigation utterances, one JSON line per frame.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON array of frames with their detections.
    #[arg(long)]
    input: PathBuf,
    /// Optional TOML configuration; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file for the JSON lines (defaults to stdout).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overrides the number of objects announced per frame.
    #[arg(long)]
    top_k: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => NavigationConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => NavigationConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }
    let guide = NavigationGuide::new(&config).context("Invalid navigation configuration")?;

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let frames: Vec<FrameInput> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse frames from {}", args.input.display()))?;
    info!("Loaded {} frames from {}", frames.len(), args.input.display());

    let (detections, skipped): (Vec<_>, Vec<_>) = frames
        .into_iter()
        .enumerate()
        .map(|(position, frame)| frame.into_detections(position))
        .unzip();

    let mut guides = guide.guide_frames(&detections);
    for (frame_guide, skipped) in guides.iter_mut().zip(skipped) {
        frame_guide.dropped += skipped;
    }

    let mut writer: BufWriter<Box<dyn Write>> = match &args.output {
        Some(path) => BufWriter::new(Box::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(std::io::stdout().lock())),
    };
    for frame_guide in &guides {
        serde_json::to_writer(&mut writer, frame_guide)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    let degraded = guides.iter().filter(|g| g.degraded).count();
    let dropped: usize = guides.iter().map(|g| g.dropped).sum();
    info!(
        "Guided {} frames ({} degraded, {} detections dropped)",
        guides.len(),
        degraded,
        dropped
    );

    Ok(())
}
