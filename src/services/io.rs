//! Image I/O operations service
//!
//! This module separates file I/O operations from the pixel algorithms,
//! making the system more testable and maintainable.

use crate::error::{BgRemovalError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Write;
use std::path::Path;

/// Service for handling image file input/output operations
pub struct ImageIOService;

impl ImageIOService {
    /// Load an image from a file path
    ///
    /// Extension-based format detection is tried first; if that fails the
    /// file content is sniffed instead, so a PNG saved as `logo.jpg` still
    /// loads.
    ///
    /// # Returns
    /// * `Ok(DynamicImage)` - Successfully loaded image
    /// * `Err(BgRemovalError::Io)` - The file is missing or unreadable
    /// * `Err(BgRemovalError::Format)` - The content is not a decodable image
    ///
    /// # Examples
    /// ```rust,no_run
    /// use logo_bgremove::services::ImageIOService;
    ///
    /// let image = ImageIOService::load_image("logo_original.png")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(BgRemovalError::file_io_error(
                "read image file",
                path_ref,
                &std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }

        match image::open(path_ref) {
            Ok(img) => Ok(img),
            Err(e) => {
                log::debug!(
                    "Extension-based loading failed for {}: {}. Attempting content-based detection.",
                    path_ref.display(),
                    e
                );

                let data = std::fs::read(path_ref).map_err(|io_err| {
                    BgRemovalError::file_io_error("read image data", path_ref, &io_err)
                })?;

                image::load_from_memory(&data)
                    .map_err(|content_err| BgRemovalError::format_error(path_ref, &content_err))
            },
        }
    }

    /// Load an image from bytes
    pub fn load_from_bytes(bytes: &[u8]) -> Result<DynamicImage> {
        image::load_from_memory(bytes).map_err(|e| {
            BgRemovalError::format(format!("Failed to decode image from bytes: {}", e))
        })
    }

    /// Encode an RGBA image as PNG bytes
    pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        image.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(buffer)
    }

    /// Save an RGBA image as PNG, replacing `path` atomically
    ///
    /// The encoded bytes go to a temporary file next to the destination,
    /// which is then renamed over it. Parent directories are created as
    /// needed.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use logo_bgremove::services::ImageIOService;
    /// use image::RgbaImage;
    ///
    /// let image = RgbaImage::new(16, 16);
    /// ImageIOService::save_png(&image, "out/logo.png")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        let parent = path_ref
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        std::fs::create_dir_all(parent)
            .map_err(|e| BgRemovalError::file_io_error("create output directory", parent, &e))?;

        let bytes = Self::encode_png(image)?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| BgRemovalError::file_io_error("write output image", path_ref, &e))?;
        staged
            .write_all(&bytes)
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|e| BgRemovalError::file_io_error("write output image", path_ref, &e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(staged.path(), std::fs::Permissions::from_mode(0o644))
                .map_err(|e| BgRemovalError::file_io_error("write output image", path_ref, &e))?;
        }

        staged
            .persist(path_ref)
            .map_err(|e| BgRemovalError::file_io_error("write output image", path_ref, &e.error))?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path_ref.display());
        Ok(())
    }

}
