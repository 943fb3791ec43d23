//! Per-pixel whiteness threshold
//!
//! Any pixel whose red, green and blue channels all exceed the threshold is
//! replaced with fully transparent black. Nothing else is touched, alpha
//! included. The test only looks at the pixel itself, so the result does not
//! depend on visiting order and re-running over its own output is a no-op.

use crate::{
    config::RemovalMode,
    error::Result,
    segmenter::BackgroundSegmenter,
    types::{PixelBuffer, TRANSPARENT},
};
use image::Rgba;
use tracing::{debug, instrument};

/// Stateless whiteness classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdClassifier {
    threshold: u8,
}

impl ThresholdClassifier {
    #[must_use]
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Whether a single pixel counts as white background
    #[must_use]
    pub fn is_background(&self, pixel: Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;
        r > self.threshold && g > self.threshold && b > self.threshold
    }
}

impl BackgroundSegmenter for ThresholdClassifier {
    fn mode(&self) -> RemovalMode {
        RemovalMode::Threshold
    }

    #[instrument(skip(self, buffer), fields(threshold = self.threshold))]
    fn segment(&self, buffer: &mut PixelBuffer) -> Result<usize> {
        let mut converted = 0usize;

        for pixel in buffer.as_image_mut().pixels_mut() {
            if self.is_background(*pixel) {
                *pixel = TRANSPARENT;
                converted += 1;
            }
        }

        debug!(converted, "threshold classification finished");
        Ok(converted)
    }
}
