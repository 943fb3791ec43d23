//! Background removal processor
//!
//! `BackgroundRemovalProcessor` is the engine behind both the library
//! one-shot functions and the CLI: it validates the configuration, loads the
//! input, dispatches to the configured segmenter, and saves the result.

use crate::{
    backends::{FloodFillSegmenter, ThresholdClassifier},
    config::{RemovalConfig, RemovalMode},
    error::Result,
    segmenter::BackgroundSegmenter,
    types::{PixelBuffer, ProcessingTimings, RemovalSummary},
};
use instant::Instant;
use log::info;
use std::path::Path;
use tracing::{debug as trace_debug, info_span, instrument};

/// Factory trait for creating segmenters from configuration
pub trait SegmenterFactory {
    /// Create the segmenter selected by `config.mode`
    ///
    /// # Errors
    ///
    /// Returns `BgRemovalError::InvalidConfig` when threshold or tolerance
    /// do not fit a channel value.
    fn create_segmenter(&self, config: &RemovalConfig) -> Result<Box<dyn BackgroundSegmenter>>;
}

/// Default factory: threshold classifier or flood fill
pub struct DefaultSegmenterFactory;

impl SegmenterFactory for DefaultSegmenterFactory {
    fn create_segmenter(&self, config: &RemovalConfig) -> Result<Box<dyn BackgroundSegmenter>> {
        match config.mode {
            RemovalMode::Threshold => {
                Ok(Box::new(ThresholdClassifier::new(config.threshold_u8()?)))
            },
            RemovalMode::Flood => Ok(Box::new(FloodFillSegmenter::new(config.tolerance_u8()?))),
        }
    }
}

/// Background removal engine
pub struct BackgroundRemovalProcessor {
    config: RemovalConfig,
    factory: Box<dyn SegmenterFactory>,
}

impl BackgroundRemovalProcessor {
    /// Create a processor with the default segmenter factory
    ///
    /// The configuration is validated here, before any file is touched.
    ///
    /// # Errors
    /// - Threshold or tolerance outside 0-255
    pub fn new(config: RemovalConfig) -> Result<Self> {
        Self::with_factory(config, Box::new(DefaultSegmenterFactory))
    }

    /// Create a processor with a custom segmenter factory
    pub fn with_factory(config: RemovalConfig, factory: Box<dyn SegmenterFactory>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, factory })
    }

    #[must_use]
    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Run the configured algorithm on an in-memory buffer
    ///
    /// Returns the number of pixels made transparent.
    pub fn process_buffer(&self, buffer: &mut PixelBuffer) -> Result<usize> {
        let segmenter = self.factory.create_segmenter(&self.config)?;
        run_segmenter(segmenter.as_ref(), buffer)
    }

    /// Load `config.input_path`, remove its background, write `config.output_path`
    pub fn process_file(&self) -> Result<RemovalSummary> {
        self.process_paths(&self.config.input_path, &self.config.output_path)
    }

    /// Load `input`, remove its background, write `output` as PNG
    ///
    /// Nothing is written unless the whole algorithm succeeded.
    #[instrument(skip(self), fields(mode = %self.config.mode))]
    pub fn process_paths(&self, input: &Path, output: &Path) -> Result<RemovalSummary> {
        let total_start = Instant::now();

        // Built before loading so a bad configuration fails without I/O
        let segmenter = self.factory.create_segmenter(&self.config)?;

        let decode_start = Instant::now();
        let mut buffer = PixelBuffer::load(input)?;
        let image_decode_ms = decode_start.elapsed().as_millis() as u64;
        let dimensions = buffer.dimensions();
        trace_debug!(
            width = dimensions.0,
            height = dimensions.1,
            image_decode_ms,
            "input decoded"
        );

        let segment_start = Instant::now();
        let transparent_pixels = run_segmenter(segmenter.as_ref(), &mut buffer)?;
        let segmentation_ms = segment_start.elapsed().as_millis() as u64;

        let encode_start = Instant::now();
        buffer.save(output)?;
        let image_encode_ms = encode_start.elapsed().as_millis() as u64;

        let summary = RemovalSummary {
            mode: segmenter.mode(),
            dimensions,
            transparent_pixels,
            timings: ProcessingTimings {
                image_decode_ms,
                segmentation_ms,
                image_encode_ms,
                total_ms: total_start.elapsed().as_millis() as u64,
            },
        };

        info!(
            "Removed background from {} -> {} ({})",
            input.display(),
            output.display(),
            summary.summary_line()
        );

        Ok(summary)
    }
}

/// Segment `buffer` inside a `segment` span
fn run_segmenter(segmenter: &dyn BackgroundSegmenter, buffer: &mut PixelBuffer) -> Result<usize> {
    let (width, height) = buffer.dimensions();
    let _span = info_span!("segment", mode = %segmenter.mode(), width, height).entered();
    segmenter.segment(buffer)
}
