//! Logo background removal CLI
//!
//! Command-line interface over the background removal processor.

use super::config::CliConfigBuilder;
use crate::{
    icon::{create_icon, DEFAULT_ICON_SIZE},
    processor::BackgroundRemovalProcessor,
    tracing_config::{init_cli_tracing, spans},
    types::RemovalSummary,
    utils::ColorParser,
};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tracing::debug;

/// Remove the light background of a logo image, writing a transparent PNG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "logo-bgremove")]
pub struct Cli {
    /// Input image (PNG, JPEG, WebP, BMP, TIFF)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output PNG [default: <INPUT_DIR>/<STEM>_transparent.png]
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Removal mode: threshold or flood [default: flood]
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Whiteness cutoff for threshold mode (0-255) [default: 240]
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Color distance for flood mode (0-255) [default: 30]
    #[arg(long)]
    pub tolerance: Option<u32>,

    /// JSON configuration file; explicit flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also compose an app icon from the result and write it here
    #[arg(long, value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Icon edge length in pixels
    #[arg(long, default_value_t = DEFAULT_ICON_SIZE)]
    pub icon_size: u32,

    /// Icon background color as #RRGGBB or #RGB
    #[arg(long, default_value = "#FFFDD0")]
    pub icon_background: String,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();

    let _tracing_guard = init_cli_tracing(cli.verbose).context("Failed to initialize tracing")?;

    let summary = run(&cli)?;
    println!("{}", summary.summary_line());

    Ok(())
}

/// Execute one CLI invocation without touching global state
///
/// All settings, icon settings included, are validated before the input is
/// read. The icon step runs only after the removal output has been saved.
pub fn run(cli: &Cli) -> Result<RemovalSummary> {
    let config = CliConfigBuilder::from_cli(cli).context("Failed to build configuration")?;
    let icon_config = CliConfigBuilder::icon_from_cli(cli)?;

    debug!(
        mode = %config.mode,
        threshold = config.threshold,
        tolerance = config.tolerance,
        "configuration resolved"
    );

    let processor = BackgroundRemovalProcessor::new(config)
        .context("Failed to create background removal processor")?;
    let config = processor.config();

    let summary = {
        let _span = spans::file_processing(&config.input_path, &config.mode.to_string()).entered();
        processor.process_file().with_context(|| {
            format!("Failed to remove background from {}", config.input_path.display())
        })?
    };
    info!("Saved {}", config.output_path.display());

    if let (Some(icon_path), Some(icon_config)) = (&cli.icon, icon_config) {
        let _span = spans::icon(icon_path, icon_config.size).entered();
        create_icon(&config.output_path, icon_path, &icon_config)
            .with_context(|| format!("Failed to create icon {}", icon_path.display()))?;
        info!(
            "Saved {}x{} icon on {} to {}",
            icon_config.size,
            icon_config.size,
            ColorParser::to_hex(icon_config.background),
            icon_path.display()
        );
    }

    Ok(summary)
}
