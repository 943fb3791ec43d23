//! Configuration types for background removal operations

use crate::error::{BgRemovalError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default whiteness cutoff for threshold mode
pub const DEFAULT_THRESHOLD: u32 = 240;

/// Default per-channel color distance for flood mode
pub const DEFAULT_TOLERANCE: u32 = 30;

/// Largest accepted value for threshold and tolerance
pub const MAX_CHANNEL_VALUE: u32 = 255;

/// Background removal algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalMode {
    /// Per-pixel whiteness test, no neighbor information
    Threshold,
    /// Corner-seeded 4-connected flood fill against the top-left color
    Flood,
}

impl Default for RemovalMode {
    fn default() -> Self {
        Self::Flood
    }
}

impl std::fmt::Display for RemovalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Threshold => write!(f, "threshold"),
            Self::Flood => write!(f, "flood"),
        }
    }
}

impl FromStr for RemovalMode {
    type Err = BgRemovalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "flood" => Ok(Self::Flood),
            other => Err(BgRemovalError::invalid_config(format!(
                "Unknown mode '{}' (expected 'threshold' or 'flood')",
                other
            ))),
        }
    }
}

/// Configuration for background removal operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemovalConfig {
    /// Algorithm used to classify background pixels
    pub mode: RemovalMode,

    /// Whiteness cutoff (0-255, threshold mode only)
    pub threshold: u32,

    /// Per-channel color distance (0-255, flood mode only)
    pub tolerance: u32,

    /// Image to read
    pub input_path: PathBuf,

    /// PNG file to write
    pub output_path: PathBuf,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            mode: RemovalMode::default(),
            threshold: DEFAULT_THRESHOLD,
            tolerance: DEFAULT_TOLERANCE,
            input_path: PathBuf::new(),
            output_path: PathBuf::new(),
        }
    }
}

impl RemovalConfig {
    /// Create a new configuration builder for fluent API construction
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logo_bgremove::{RemovalConfig, RemovalMode};
    ///
    /// let config = RemovalConfig::builder()
    ///     .mode(RemovalMode::Threshold)
    ///     .threshold(230)
    ///     .input_path("logo_original.png")
    ///     .output_path("logo.png")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.threshold, 230);
    /// ```
    #[must_use]
    pub fn builder() -> RemovalConfigBuilder {
        RemovalConfigBuilder::default()
    }

    /// Validate all configuration parameters
    ///
    /// # Validation Rules
    ///
    /// - Threshold: 0-255 (inclusive)
    /// - Tolerance: 0-255 (inclusive)
    ///
    /// Paths are not checked here; the processor reports unreadable or
    /// unwritable paths as I/O errors when it touches them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logo_bgremove::RemovalConfig;
    ///
    /// let mut config = RemovalConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.tolerance = 256;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.threshold > MAX_CHANNEL_VALUE {
            return Err(BgRemovalError::config_value_error(
                "threshold",
                self.threshold,
                "0-255",
                Some(DEFAULT_THRESHOLD),
            ));
        }

        if self.tolerance > MAX_CHANNEL_VALUE {
            return Err(BgRemovalError::config_value_error(
                "tolerance",
                self.tolerance,
                "0-255",
                Some(DEFAULT_TOLERANCE),
            ));
        }

        Ok(())
    }

    /// Threshold as a channel value
    pub fn threshold_u8(&self) -> Result<u8> {
        u8::try_from(self.threshold).map_err(|_| {
            BgRemovalError::config_value_error("threshold", self.threshold, "0-255", None)
        })
    }

    /// Tolerance as a channel value
    pub fn tolerance_u8(&self) -> Result<u8> {
        u8::try_from(self.tolerance).map_err(|_| {
            BgRemovalError::config_value_error("tolerance", self.tolerance, "0-255", None)
        })
    }

    /// Parse a configuration from JSON text
    ///
    /// Missing fields fall back to their defaults; an unknown `mode` string
    /// is a configuration error. Ranges are left to `validate`, so callers
    /// can still override an out-of-range value before building.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            BgRemovalError::invalid_config(format!("Failed to parse configuration: {}", e))
        })
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = std::fs::read_to_string(path_ref)
            .map_err(|e| BgRemovalError::file_io_error("read configuration", path_ref, &e))?;
        serde_json::from_str(&content).map_err(|e| {
            BgRemovalError::invalid_config(format!(
                "Failed to parse configuration '{}': {}",
                path_ref.display(),
                e
            ))
        })
    }
}

/// Builder for `RemovalConfig`
#[derive(Debug, Default)]
pub struct RemovalConfigBuilder {
    config: RemovalConfig,
}

impl RemovalConfigBuilder {
    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: RemovalConfig) -> Self {
        Self { config }
    }

    /// Set removal mode
    #[must_use]
    pub fn mode(mut self, mode: RemovalMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set whiteness threshold (validated at build time)
    #[must_use]
    pub fn threshold(mut self, threshold: u32) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set color tolerance (validated at build time)
    #[must_use]
    pub fn tolerance(mut self, tolerance: u32) -> Self {
        self.config.tolerance = tolerance;
        self
    }

    /// Set input image path
    #[must_use]
    pub fn input_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.input_path = path.into();
        self
    }

    /// Set output PNG path
    #[must_use]
    pub fn output_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    /// - Threshold or tolerance outside 0-255
    pub fn build(self) -> Result<RemovalConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RemovalConfig::default();
        assert_eq!(config.mode, RemovalMode::Flood);
        assert_eq!(config.threshold, 240);
        assert_eq!(config.tolerance, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = RemovalConfig::builder()
            .mode(RemovalMode::Threshold)
            .threshold(200)
            .tolerance(12)
            .input_path("in.jpg")
            .output_path("out.png")
            .build()
            .unwrap();

        assert_eq!(config.mode, RemovalMode::Threshold);
        assert_eq!(config.threshold, 200);
        assert_eq!(config.tolerance, 12);
        assert_eq!(config.input_path, PathBuf::from("in.jpg"));
        assert_eq!(config.output_path, PathBuf::from("out.png"));
    }

    #[test]
    fn test_config_validation_boundaries() {
        let config = RemovalConfig::builder().threshold(0).tolerance(0).build();
        assert!(config.is_ok());

        let config = RemovalConfig::builder().threshold(255).tolerance(255).build();
        assert!(config.is_ok());

        let err = RemovalConfig::builder().threshold(256).build().unwrap_err();
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));
        assert!(err.to_string().contains("threshold"));

        let err = RemovalConfig::builder().tolerance(1000).build().unwrap_err();
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_channel_conversions() {
        let config = RemovalConfig::default();
        assert_eq!(config.threshold_u8().unwrap(), 240);
        assert_eq!(config.tolerance_u8().unwrap(), 30);

        let mut config = RemovalConfig::default();
        config.tolerance = 300;
        assert!(config.tolerance_u8().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("threshold".parse::<RemovalMode>().unwrap(), RemovalMode::Threshold);
        assert_eq!("flood".parse::<RemovalMode>().unwrap(), RemovalMode::Flood);
        assert_eq!(" FLOOD ".parse::<RemovalMode>().unwrap(), RemovalMode::Flood);

        let err = "magic".parse::<RemovalMode>().unwrap_err();
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_mode_display_roundtrips_through_parse() {
        for mode in [RemovalMode::Threshold, RemovalMode::Flood] {
            assert_eq!(mode.to_string().parse::<RemovalMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let config = RemovalConfig::from_json_str(r#"{"mode": "threshold"}"#).unwrap();
        assert_eq!(config.mode, RemovalMode::Threshold);
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_json_unknown_mode_is_config_error() {
        let err = RemovalConfig::from_json_str(r#"{"mode": "blur"}"#).unwrap_err();
        assert!(matches!(err, BgRemovalError::InvalidConfig(_)));
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = RemovalConfig::builder()
            .tolerance(50)
            .input_path("logo_original.png")
            .output_path("logo.png")
            .build()
            .unwrap();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = RemovalConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_file_missing_is_io_error() {
        let err = RemovalConfig::from_json_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, BgRemovalError::Io(_)));
    }
}
