#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # Logo Background Removal Library
//!
//! Removes the background of logo-style images, where the subject sits on a
//! near-uniform light background, and writes an RGBA PNG with that background
//! made fully transparent.
//!
//! Two algorithms are available:
//!
//! - **Threshold** (`RemovalMode::Threshold`): every pixel whose red, green and
//!   blue channels all exceed the threshold becomes `(0, 0, 0, 0)`, wherever
//!   it sits in the image.
//! - **Flood** (`RemovalMode::Flood`, default): a 4-connected flood fill seeded
//!   at the image corners clears only the region connected to the border whose
//!   color is within `tolerance` of the top-left pixel. Light areas enclosed by
//!   the logo are preserved.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logo_bgremove::{remove_background, RemovalConfig, RemovalMode};
//!
//! # fn example() -> logo_bgremove::Result<()> {
//! let config = RemovalConfig::builder()
//!     .mode(RemovalMode::Flood)
//!     .tolerance(30)
//!     .input_path("logo_original.png")
//!     .output_path("logo.png")
//!     .build()?;
//!
//! let summary = remove_background(&config)?;
//! println!("{}", summary.summary_line());
//! # Ok(())
//! # }
//! ```
//!
//! ## In-memory processing
//!
//! ```rust
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use logo_bgremove::{remove_background_from_image, RemovalConfig, RemovalMode};
//!
//! let mut logo = RgbaImage::from_pixel(5, 5, Rgba([255, 255, 255, 255]));
//! logo.put_pixel(2, 2, Rgba([200, 0, 0, 255]));
//!
//! let config = RemovalConfig::builder().mode(RemovalMode::Flood).tolerance(10).build().unwrap();
//! let (result, removed) =
//!     remove_background_from_image(DynamicImage::ImageRgba8(logo), &config).unwrap();
//!
//! assert_eq!(removed, 24);
//! assert_eq!(*result.get_pixel(2, 2), Rgba([200, 0, 0, 255]));
//! ```
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface and tracing subscriber setup
//! - `webp-support` (default): WebP input decoding
//! - `tracing-json`: JSON log output for the CLI
//! - `tracing-files`: log file output for the CLI
//!
//! To use only as a library without CLI dependencies:
//!
//! ```toml
//! [dependencies]
//! logo-bgremove = { version = "0.1", default-features = false }
//! ```

pub mod backends;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod icon;
pub mod processor;
pub mod segmenter;
pub mod services;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;
pub mod utils;

use image::{DynamicImage, RgbaImage};

// Public API exports
pub use backends::{corner_seeds, Direction, FloodFillSegmenter, ThresholdClassifier, VisitedSet};
pub use config::{RemovalConfig, RemovalConfigBuilder, RemovalMode};
pub use error::{BgRemovalError, Result};
pub use icon::{compose_icon, create_icon, IconConfig};
pub use processor::{BackgroundRemovalProcessor, DefaultSegmenterFactory, SegmenterFactory};
pub use segmenter::BackgroundSegmenter;
pub use services::ImageIOService;
pub use types::{PixelBuffer, ProcessingTimings, RemovalSummary, TRANSPARENT};
pub use utils::{is_similar, ColorParser};

#[cfg(feature = "cli")]
pub use tracing_config::{init_cli_tracing, TracingConfig, TracingFormat, TracingOutput};

/// Remove the background of `config.input_path` and write `config.output_path`
///
/// The configuration is validated before the input is opened, and the output
/// is only written once the whole image has been processed.
///
/// # Errors
/// - `InvalidConfig` for a threshold or tolerance outside 0-255
/// - `Io` when the input cannot be read or the output cannot be written
/// - `Format` when the input is not a decodable image
pub fn remove_background(config: &RemovalConfig) -> Result<RemovalSummary> {
    BackgroundRemovalProcessor::new(config.clone())?.process_file()
}

/// Remove the background of an in-memory image
///
/// The input is converted to RGBA first. Returns the processed image together
/// with the number of pixels that were made transparent. The path fields of
/// `config` are ignored.
pub fn remove_background_from_image(
    image: DynamicImage,
    config: &RemovalConfig,
) -> Result<(RgbaImage, usize)> {
    let processor = BackgroundRemovalProcessor::new(config.clone())?;
    let mut buffer = PixelBuffer::from_image(image);
    let removed = processor.process_buffer(&mut buffer)?;
    Ok((buffer.into_image(), removed))
}

/// Remove the background of encoded image bytes, returning PNG bytes
///
/// Suited to callers that hold image data in memory rather than on disk.
pub fn remove_background_from_bytes(bytes: &[u8], config: &RemovalConfig) -> Result<Vec<u8>> {
    let processor = BackgroundRemovalProcessor::new(config.clone())?;
    let mut buffer = PixelBuffer::load_from_bytes(bytes)?;
    processor.process_buffer(&mut buffer)?;
    buffer.to_png_bytes()
}
