//! Background segmenter abstraction

use crate::{config::RemovalMode, error::Result, types::PixelBuffer};

/// Trait for background classification algorithms
///
/// A segmenter mutates the buffer in place, turning every pixel it
/// classifies as background fully transparent, and reports how many pixels
/// it converted.
pub trait BackgroundSegmenter {
    /// The configuration mode this segmenter implements
    fn mode(&self) -> RemovalMode;

    /// Make background pixels transparent
    ///
    /// # Errors
    /// - Pixel access outside the grid (an internal invariant violation)
    fn segment(&self, buffer: &mut PixelBuffer) -> Result<usize>;
}
