//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::{
    config::{RemovalConfig, RemovalConfigBuilder, RemovalMode},
    icon::IconConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Convert CLI arguments to a validated `RemovalConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build the removal configuration from CLI arguments
    ///
    /// Values from `--config` form the base; explicit flags override them.
    /// Nothing here touches the input image, so a bad mode or an
    /// out-of-range value fails before any image I/O.
    pub(crate) fn from_cli(cli: &Cli) -> Result<RemovalConfig> {
        let base = match &cli.config {
            Some(path) => RemovalConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
            None => RemovalConfig::default(),
        };

        let mut builder = RemovalConfigBuilder::from_config(base.clone()).input_path(&cli.input);

        if let Some(mode) = &cli.mode {
            let mode: RemovalMode = mode.parse().context("Invalid --mode")?;
            builder = builder.mode(mode);
        }
        if let Some(threshold) = cli.threshold {
            builder = builder.threshold(threshold);
        }
        if let Some(tolerance) = cli.tolerance {
            builder = builder.tolerance(tolerance);
        }

        let output = match &cli.output {
            Some(output) => output.clone(),
            None if !base.output_path.as_os_str().is_empty() => base.output_path,
            None => generate_output_path(&cli.input),
        };

        builder.output_path(output).build().context("Invalid configuration")
    }

    /// Build the icon configuration when `--icon` was given
    pub(crate) fn icon_from_cli(cli: &Cli) -> Result<Option<IconConfig>> {
        if cli.icon.is_none() {
            return Ok(None);
        }

        let config = IconConfig::default()
            .with_size(cli.icon_size)
            .with_background_hex(&cli.icon_background)
            .context("Invalid --icon-background")?;
        config.validate().context("Invalid icon settings")?;
        Ok(Some(config))
    }
}

/// Default output next to the input: `<dir>/<stem>_transparent.png`
pub(crate) fn generate_output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let dir = input_path.parent().unwrap_or(Path::new("."));

    dir.join(format!("{}_transparent.png", stem.to_string_lossy()))
}
