//! Core types: the owned pixel grid and the per-run summary

use crate::{
    config::RemovalMode,
    error::{BgRemovalError, Result},
    services::ImageIOService,
};
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

/// A fully transparent pixel with all color channels cleared
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Decoded image as a row-major grid of RGBA pixels
///
/// Every pixel access is bounds-checked and out-of-range coordinates are
/// reported as [`BgRemovalError::OutOfBounds`] rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap an RGBA image
    #[must_use]
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Canonicalize any decoded image to RGBA
    ///
    /// Sources without an alpha channel (RGB, grayscale) get A=255.
    #[must_use]
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.into_rgba8(),
        }
    }

    /// Decode an image file into a pixel buffer
    ///
    /// # Errors
    /// - `Io` if the path cannot be read
    /// - `Format` if the content is not a decodable raster image
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        ImageIOService::load_image(path).map(Self::from_image)
    }

    /// Decode in-memory image bytes into a pixel buffer
    pub fn load_from_bytes(bytes: &[u8]) -> Result<Self> {
        ImageIOService::load_from_bytes(bytes).map(Self::from_image)
    }

    /// Encode the grid as PNG and write it to `path`
    ///
    /// The destination is replaced atomically, so an interrupted save never
    /// leaves a truncated file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        ImageIOService::save_png(&self.image, path)
    }

    /// Encode the grid as PNG bytes
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        ImageIOService::encode_png(&self.image)
    }

    /// Read the pixel at (x, y)
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba<u8>> {
        self.image
            .get_pixel_checked(x, y)
            .copied()
            .ok_or_else(|| BgRemovalError::out_of_bounds(x, y, self.dimensions()))
    }

    /// Overwrite the pixel at (x, y)
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba<u8>) -> Result<()> {
        let dimensions = self.dimensions();
        let slot = self
            .image
            .get_pixel_mut_checked(x, y)
            .ok_or_else(|| BgRemovalError::out_of_bounds(x, y, dimensions))?;
        *slot = pixel;
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Total number of pixels (W×H)
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    /// Number of pixels with A=0
    #[must_use]
    pub fn count_transparent(&self) -> usize {
        self.image.pixels().filter(|p| p[3] == 0).count()
    }

    #[must_use]
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Mutable access for whole-grid transforms that visit every pixel
    pub(crate) fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Detailed timing breakdown for one engine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingTimings {
    /// Image loading and decoding from file
    pub image_decode_ms: u64,

    /// Background classification (threshold or flood fill)
    pub segmentation_ms: u64,

    /// PNG encoding and write
    pub image_encode_ms: u64,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

/// Outcome of one background removal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Algorithm that ran
    pub mode: RemovalMode,

    /// Image width and height
    pub dimensions: (u32, u32),

    /// Pixels converted to transparent by the algorithm
    pub transparent_pixels: usize,

    pub timings: ProcessingTimings,
}

impl RemovalSummary {
    /// Share of the image that was removed, in percent
    #[must_use]
    pub fn removed_percentage(&self) -> f64 {
        let total = f64::from(self.dimensions.0) * f64::from(self.dimensions.1);
        if total == 0.0 {
            0.0
        } else {
            self.transparent_pixels as f64 / total * 100.0
        }
    }

    /// One-line human readable report
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} mode: {} of {} pixels made transparent ({:.1}%) in {}ms",
            self.mode,
            self.transparent_pixels,
            u64::from(self.dimensions.0) * u64::from(self.dimensions.1),
            self.removed_percentage(),
            self.timings.total_ms
        )
    }
}
