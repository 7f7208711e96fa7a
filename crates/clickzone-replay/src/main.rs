//! Headless replay of gesture scripts against the condition selector view.

mod replay;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use clickzone_core::{ScreenMetrics, SelectorConfig};
use std::path::PathBuf;

/// Replay a gesture script over a screenshot and save the selected area.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Screenshot to select from
    image: PathBuf,

    /// JSON gesture script
    script: PathBuf,

    /// JSON selector configuration, defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the selected area
    #[arg(short, long, default_value = "selection.png")]
    output: PathBuf,

    /// Also write the last rendered frame
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Physical pixels per dp
    #[arg(long, default_value_t = 1.0)]
    density: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SelectorConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SelectorConfig::default(),
    };
    let script = script::Script::from_file(&args.script)?;
    let image = image::open(&args.image)
        .with_context(|| format!("Failed to open image {}", args.image.display()))?
        .to_rgba8();

    let metrics = ScreenMetrics::new(args.density);
    log::info!(
        "Replaying {} steps on a {}x{} view",
        script.steps.len(),
        script.view[0],
        script.view[1]
    );

    let outcome = replay::run(&script, image, &config, metrics)?;
    let selection = outcome.view.selection().context("No selection after replay")?;
    selection
        .image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "Selection {}x{} at ({}, {}) written to {}",
        selection.area.width,
        selection.area.height,
        selection.area.x,
        selection.area.y,
        args.output.display()
    );

    if let Some(path) = &args.preview {
        let frame = replay::preview(&outcome.view, script.view)?;
        frame
            .save(path)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
    }
    Ok(())
}
