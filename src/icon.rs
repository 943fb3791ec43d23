//! App icon composition
//!
//! Places a logo with a transparent background onto a solid square canvas.
//! This runs on the engine's saved output and is never part of a removal
//! run itself.

use crate::{
    error::{BgRemovalError, Result},
    services::ImageIOService,
    utils::ColorParser,
};
use image::{imageops, imageops::FilterType, Rgba, Rgba32FImage, RgbaImage};
use std::path::Path;

/// Default icon edge length in pixels
pub const DEFAULT_ICON_SIZE: u32 = 1024;

/// Default canvas color (#FFFDD0, cream)
pub const DEFAULT_ICON_BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFD, 0xD0, 0xFF]);

/// Default share of the canvas edge the logo may occupy
pub const DEFAULT_LOGO_SCALE: f64 = 0.9;

/// Largest icon edge accepted by [`IconConfig::validate`]
pub const MAX_ICON_SIZE: u32 = 8192;

/// Icon composition settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconConfig {
    /// Square canvas edge length
    pub size: u32,
    /// Solid canvas color; its alpha is ignored, icons are always opaque
    pub background: Rgba<u8>,
    /// Largest logo edge relative to `size`, in (0, 1]
    pub logo_scale: f64,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_ICON_SIZE,
            background: DEFAULT_ICON_BACKGROUND,
            logo_scale: DEFAULT_LOGO_SCALE,
        }
    }
}

impl IconConfig {
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    /// Set the canvas color from a `#RRGGBB` / `#RGB` string
    pub fn with_background_hex(self, hex: &str) -> Result<Self> {
        Ok(self.with_background(ColorParser::parse_hex(hex)?))
    }

    #[must_use]
    pub fn with_logo_scale(mut self, logo_scale: f64) -> Self {
        self.logo_scale = logo_scale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_ICON_SIZE {
            return Err(BgRemovalError::config_value_error(
                "icon size",
                self.size,
                "1-8192",
                Some(DEFAULT_ICON_SIZE),
            ));
        }
        if !(self.logo_scale > 0.0 && self.logo_scale <= 1.0) {
            return Err(BgRemovalError::config_value_error(
                "logo scale",
                self.logo_scale,
                "(0, 1]",
                Some(DEFAULT_LOGO_SCALE),
            ));
        }
        Ok(())
    }

    /// Largest edge the logo may have on this canvas
    #[must_use]
    pub fn logo_box(&self) -> u32 {
        ((f64::from(self.size) * self.logo_scale) as u32).max(1)
    }
}

/// Dimensions that fit `(width, height)` inside a `max_edge` square
///
/// Aspect ratio is kept and images already small enough are never enlarged.
#[must_use]
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width <= max_edge && height <= max_edge {
        return (width, height);
    }
    let ratio = f64::from(max_edge) / f64::from(width.max(height));
    let scaled = |edge: u32| ((f64::from(edge) * ratio).round() as u32).clamp(1, max_edge);
    (scaled(width), scaled(height))
}

/// Resize with alpha-weighted filtering
///
/// Color is premultiplied by alpha before filtering and divided back out
/// afterwards, so fully transparent pixels (stored as black) add nothing to
/// the colors along the logo's edge.
fn resize_premultiplied(logo: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(logo.width(), logo.height(), |x, y| {
        let [r, g, b, a] = logo.get_pixel(x, y).0;
        let alpha = f32::from(a) / 255.0;
        Rgba([
            f32::from(r) / 255.0 * alpha,
            f32::from(g) / 255.0 * alpha,
            f32::from(b) / 255.0 * alpha,
            alpha,
        ])
    });
    let resized = imageops::resize(&premultiplied, width, height, FilterType::Lanczos3);

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = resized.get_pixel(x, y).0;
        let alpha = a.clamp(0.0, 1.0);
        let alpha_u8 = (alpha * 255.0).round() as u8;
        if alpha_u8 == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| ((c / alpha).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([straight(r), straight(g), straight(b), alpha_u8])
    })
}

/// Source-over blend of `top` onto an opaque `bottom`, rounded to nearest
fn blend_over_opaque(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let alpha = u32::from(top[3]);
    let mix = |fg: u8, bg: u8| {
        ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
    };
    Rgba([mix(top[0], bottom[0]), mix(top[1], bottom[1]), mix(top[2], bottom[2]), 255])
}

/// Composite `logo` centered onto a solid square canvas
pub fn compose_icon(logo: &RgbaImage, config: &IconConfig) -> Result<RgbaImage> {
    config.validate()?;

    let (width, height) = fit_within(logo.width(), logo.height(), config.logo_box());
    let fitted = if (width, height) == logo.dimensions() {
        logo.clone()
    } else {
        resize_premultiplied(logo, width, height)
    };

    let [r, g, b, _] = config.background.0;
    let mut canvas = RgbaImage::from_pixel(config.size, config.size, Rgba([r, g, b, 255]));
    let offset_x = (config.size - width) / 2;
    let offset_y = (config.size - height) / 2;
    for (x, y, pixel) in fitted.enumerate_pixels() {
        let slot = canvas.get_pixel_mut(offset_x + x, offset_y + y);
        *slot = blend_over_opaque(*slot, *pixel);
    }

    tracing::debug!(
        logo_width = width,
        logo_height = height,
        offset_x,
        offset_y,
        size = config.size,
        "icon composed"
    );
    Ok(canvas)
}

/// Read a transparent logo from `input` and write the icon PNG to `output`
pub fn create_icon<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    config: &IconConfig,
) -> Result<()> {
    config.validate()?;
    let logo = ImageIOService::load_image(input.as_ref())?.into_rgba8();
    let icon = compose_icon(&logo, config)?;
    ImageIOService::save_png(&icon, output.as_ref())?;
    log::info!("Saved icon to {}", output.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = IconConfig::default();
        assert_eq!(config.size, 1024);
        assert_eq!(config.background, Rgba([0xFF, 0xFD, 0xD0, 0xFF]));
        assert_eq!(config.logo_box(), 921);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(IconConfig::default().with_size(0).validate().is_err());
        assert!(IconConfig::default().with_size(MAX_ICON_SIZE).validate().is_ok());
        assert!(IconConfig::default().with_size(MAX_ICON_SIZE + 1).validate().is_err());
        assert!(IconConfig::default().with_logo_scale(0.0).validate().is_err());
        assert!(IconConfig::default().with_logo_scale(1.5).validate().is_err());
        assert!(IconConfig::default().with_logo_scale(f64::NAN).validate().is_err());
        assert!(IconConfig::default().with_background_hex("#XYZ").is_err());
    }

    #[test]
    fn test_fit_within() {
        assert_eq!(fit_within(100, 50, 90), (90, 45));
        assert_eq!(fit_within(50, 200, 100), (25, 100));
        assert_eq!(fit_within(40, 30, 90), (40, 30));
        assert_eq!(fit_within(1000, 1, 10), (10, 1));
    }

    #[test]
    fn test_logo_is_centered_on_background() {
        let logo = RgbaImage::from_pixel(4, 2, Rgba([200, 0, 0, 255]));
        let config = IconConfig::default().with_size(10);

        let icon = compose_icon(&logo, &config).unwrap();
        assert_eq!(icon.dimensions(), (10, 10));
        // 4x2 logo at offset (3, 4)
        assert_eq!(*icon.get_pixel(3, 4), Rgba([200, 0, 0, 255]));
        assert_eq!(*icon.get_pixel(6, 5), Rgba([200, 0, 0, 255]));
        assert_eq!(*icon.get_pixel(2, 4), DEFAULT_ICON_BACKGROUND);
        assert_eq!(*icon.get_pixel(3, 6), DEFAULT_ICON_BACKGROUND);
    }

    #[test]
    fn test_transparent_logo_pixels_show_background() {
        let mut logo = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        logo.put_pixel(0, 0, Rgba([0, 0, 255, 255]));
        let config = IconConfig::default()
            .with_size(4)
            .with_background(Rgba([10, 20, 30, 255]));

        let icon = compose_icon(&logo, &config).unwrap();
        assert_eq!(*icon.get_pixel(1, 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*icon.get_pixel(2, 2), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_large_logo_is_shrunk_to_fit() {
        let logo = RgbaImage::from_pixel(400, 200, Rgba([0, 128, 0, 255]));
        let config = IconConfig::default().with_size(100);

        let icon = compose_icon(&logo, &config).unwrap();
        assert_eq!(icon.dimensions(), (100, 100));
        // Logo becomes 90x45 at offset (5, 27)
        assert_eq!(*icon.get_pixel(4, 50), DEFAULT_ICON_BACKGROUND);
        assert_eq!(*icon.get_pixel(50, 26), DEFAULT_ICON_BACKGROUND);
        let center = icon.get_pixel(50, 50);
        assert_eq!(center[3], 255);
        assert!((127..=129).contains(&center[1]));
    }

    #[test]
    fn test_oversized_icon_is_rejected_before_allocating() {
        let logo = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let err = compose_icon(&logo, &IconConfig::default().with_size(100_000)).unwrap_err();
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));
        assert!(err.to_string().contains("100000"));
    }

    #[test]
    fn test_shrunk_edge_has_no_dark_fringe() {
        // Opaque white left half, erased (0,0,0,0) right half
        let logo = RgbaImage::from_fn(200, 200, |x, _| {
            if x < 100 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let config = IconConfig::default()
            .with_size(100)
            .with_background(Rgba([255, 255, 255, 255]));

        let icon = compose_icon(&logo, &config).unwrap();
        assert!(icon.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_shrunk_colored_edge_keeps_its_color() {
        let logo = RgbaImage::from_fn(200, 200, |x, _| {
            if x < 100 {
                Rgba([200, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let config = IconConfig::default()
            .with_size(100)
            .with_background(Rgba([255, 255, 255, 255]));

        let icon = compose_icon(&logo, &config).unwrap();
        // Red lies between the logo's 200 and the canvas' 255 everywhere
        let darkest_red = icon.pixels().map(|p| p[0]).min().unwrap();
        assert!(darkest_red >= 199, "darkest red channel {darkest_red}");
        assert!(icon.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_background_alpha_is_ignored() {
        let logo = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let config = IconConfig::default().with_size(3).with_background(Rgba([9, 8, 7, 0]));
        let icon = compose_icon(&logo, &config).unwrap();
        assert!(icon.pixels().all(|p| *p == Rgba([9, 8, 7, 255])));
    }

    #[test]
    fn test_create_icon_file_roundtrip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("logo.png");
        let output = dir.path().join("logo_icon.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0])).save(&input).unwrap();

        create_icon(&input, &output, &IconConfig::default().with_size(32)).unwrap();

        let icon = ImageIOService::load_image(&output).unwrap().into_rgba8();
        assert_eq!(icon.dimensions(), (32, 32));
        assert!(icon.pixels().all(|p| *p == DEFAULT_ICON_BACKGROUND));
    }
}
