//! Error types for background removal operations

use thiserror::Error;

/// Result type alias for background removal operations
pub type Result<T> = std::result::Result<T, BgRemovalError>;

/// Error types for background removal operations
#[derive(Error, Debug)]
pub enum BgRemovalError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes could not be decoded as a supported raster image
    #[error("Format error: {0}")]
    Format(String),

    /// Encoder errors surfaced by the image crate
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pixel access outside the image grid
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
}

impl BgRemovalError {
    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a new format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }

    /// Create file I/O error with operation context
    pub fn file_io_error<P: AsRef<std::path::Path>>(
        operation: &str,
        path: P,
        error: &std::io::Error,
    ) -> Self {
        let path_display = path.as_ref().display();
        Self::Io(std::io::Error::new(
            error.kind(),
            format!("Failed to {} '{}': {}", operation, path_display, error),
        ))
    }

    /// Create image decoding error with format context
    pub fn format_error<P: AsRef<std::path::Path>>(path: P, error: &image::ImageError) -> Self {
        let path_display = path.as_ref().display();
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        Self::Format(format!(
            "Failed to decode image '{}' (extension: {}): {}. Supported formats: PNG, JPEG, WebP, TIFF, BMP",
            path_display, extension, error
        ))
    }

    /// Create configuration error with valid ranges
    pub fn config_value_error<T: std::fmt::Display>(
        parameter: &str,
        value: T,
        valid_range: &str,
        recommended: Option<T>,
    ) -> Self {
        let recommendation = match recommended {
            Some(rec) => format!(" Recommended: {}", rec),
            None => String::new(),
        };

        Self::InvalidConfig(format!(
            "Invalid {}: {} (valid range: {}).{}",
            parameter, value, valid_range, recommendation
        ))
    }

    /// Create an out-of-bounds pixel access error
    #[must_use]
    pub fn out_of_bounds(x: u32, y: u32, dimensions: (u32, u32)) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width: dimensions.0,
            height: dimensions.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let err = BgRemovalError::invalid_config("test config error");
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));

        let err = BgRemovalError::format("not an image");
        assert!(matches!(err, BgRemovalError::Format(_)));

        let err = BgRemovalError::out_of_bounds(4, 0, (4, 4));
        assert!(matches!(
            err,
            BgRemovalError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 4
            }
        ));
    }

    #[test]
    fn test_error_display() {
        let err = BgRemovalError::invalid_config("unknown mode 'blur'");
        assert_eq!(err.to_string(), "Invalid configuration: unknown mode 'blur'");

        let err = BgRemovalError::out_of_bounds(7, 2, (5, 5));
        assert_eq!(err.to_string(), "Pixel (7, 2) is outside the 5x5 image");
    }

    #[test]
    fn test_enhanced_error_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = BgRemovalError::file_io_error("write output", Path::new("/root/out.png"), &io_error);
        let error_string = err.to_string();
        assert!(error_string.contains("write output"));
        assert!(error_string.contains("/root/out.png"));
        if let BgRemovalError::Io(inner) = err {
            assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied);
        } else {
            panic!("expected Io variant");
        }

        let err = BgRemovalError::config_value_error("tolerance", 300, "0-255", Some(30));
        let error_string = err.to_string();
        assert!(error_string.contains("tolerance"));
        assert!(error_string.contains("300"));
        assert!(error_string.contains("0-255"));
        assert!(error_string.contains("Recommended: 30"));
    }
}
