//! Synthetic image builders shared by the segmenter tests

use crate::types::PixelBuffer;
use image::{Rgba, RgbaImage};

/// Uniformly colored image
pub(crate) fn solid(width: u32, height: u32, color: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_rgba(RgbaImage::from_pixel(width, height, Rgba(color)))
}

/// Alternating colors, `even` where `(x + y)` is even
pub(crate) fn checkerboard(width: u32, height: u32, even: [u8; 4], odd: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba(even)
        } else {
            Rgba(odd)
        }
    }))
}

/// Square image with a `border_width` frame of one color around another
pub(crate) fn bordered(size: u32, border_width: u32, border: [u8; 4], center: [u8; 4]) -> PixelBuffer {
    PixelBuffer::from_rgba(RgbaImage::from_fn(size, size, |x, y| {
        let inside = (border_width..size - border_width).contains(&x)
            && (border_width..size - border_width).contains(&y);
        if inside {
            Rgba(center)
        } else {
            Rgba(border)
        }
    }))
}

/// Grey gradient, white at every corner and darkening to (200,200,200) at
/// the point farthest from all corners
pub(crate) fn corner_gradient(width: u32, height: u32) -> PixelBuffer {
    let distance = |x: u32, y: u32| x.min(width - 1 - x) + y.min(height - 1 - y);
    let max_distance = distance((width - 1) / 2, (height - 1) / 2).max(1);
    PixelBuffer::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
        let v = (255 - 55 * distance(x, y) / max_distance) as u8;
        Rgba([v, v, v, 255])
    }))
}

/// Mostly near-white noise with darker blobs, deterministic per `seed`
pub(crate) fn noisy_two_tone(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as u32
    };

    let mut image = RgbaImage::new(width, height);
    for pixel in image.pixels_mut() {
        let roll = next() % 100;
        let jitter = (next() % 16) as u8;
        *pixel = if roll < 65 {
            Rgba([255 - jitter, 250 - jitter, 255 - jitter, 255])
        } else {
            Rgba([90 + jitter, 40, 160 - jitter, 255])
        };
    }
    image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
    PixelBuffer::from_rgba(image)
}
