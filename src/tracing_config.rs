//! Tracing configuration for the CLI
//!
//! Applications install a subscriber; the library itself only emits events
//! and spans. `log` records from library code are bridged into the same
//! subscriber.

use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Configuration for tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable output with ANSI colors (default for the CLI)
    Console,
    /// Plain compact output for CI logs
    Compact,
    /// JSON structured logging
    #[cfg(feature = "tracing-json")]
    Json,
}

/// Configuration for tracing output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracingOutput {
    /// Output to stderr (default)
    Console,
    /// Output to a file, written by a background worker
    #[cfg(feature = "tracing-files")]
    File(std::path::PathBuf),
}

/// Keeps buffered log writers alive until dropped
///
/// Hold this for the lifetime of `main`; dropping it flushes file output.
#[derive(Default)]
pub struct TracingGuard {
    #[cfg(feature = "tracing-files")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Tracing configuration builder
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    pub format: TracingFormat,
    pub output: TracingOutput,
    /// Environment filter string, overrides verbosity if set
    pub env_filter: Option<String>,
    /// Session ID for correlating a run's events
    pub session_id: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: TracingFormat::Console,
            output: TracingOutput::Console,
            env_filter: None,
            session_id: None,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-2+)
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_session_id<S: Into<String>>(mut self, session_id: S) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Convert verbosity level to a tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",  // run summary and saved paths
            1 => "debug", // -v: decode/encode details, seeds, reference color
            _ => "trace", // -vv and beyond
        }
    }

    /// Install the global subscriber
    ///
    /// Fails if a global subscriber is already set or the filter does not parse.
    pub fn init(self) -> anyhow::Result<TracingGuard> {
        let filter = match &self.env_filter {
            Some(env_filter) => EnvFilter::try_new(env_filter)?,
            None => EnvFilter::try_new(self.verbosity_to_filter())?,
        };

        let (layer, guard) = match &self.output {
            TracingOutput::Console => {
                (fmt_layer(self.format, std::io::stderr, true), TracingGuard::default())
            },
            #[cfg(feature = "tracing-files")]
            TracingOutput::File(path) => {
                let directory = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or_else(|| std::path::Path::new("."));
                let file_name = path
                    .file_name()
                    .unwrap_or_else(|| std::ffi::OsStr::new("logo-bgremove.log"));
                let appender = tracing_appender::rolling::never(directory, file_name);
                let (writer, file_guard) = tracing_appender::non_blocking(appender);
                let guard = TracingGuard { _file_guard: Some(file_guard) };
                (fmt_layer(self.format, writer, false), guard)
            },
        };

        Registry::default().with(layer).with(filter).try_init()?;

        if let Some(session_id) = &self.session_id {
            tracing::info!(session_id = %session_id, "background removal session started");
        }

        Ok(guard)
    }
}

fn fmt_layer<W>(format: TracingFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        TracingFormat::Console => fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .with_level(true)
            .compact()
            .boxed(),
        TracingFormat::Compact => fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false)
            .compact()
            .boxed(),
        #[cfg(feature = "tracing-json")]
        TracingFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    }
}

/// Initialize tracing with CLI defaults and a fresh session id
pub fn init_cli_tracing(verbosity: u8) -> anyhow::Result<TracingGuard> {
    let session_id = uuid::Uuid::new_v4().to_string();

    TracingConfig::new()
        .with_verbosity(verbosity)
        .with_format(TracingFormat::Console)
        .with_session_id(session_id)
        .init()
}

/// Span helpers for the CLI run
pub mod spans {
    use std::path::Path;
    use tracing::{Level, Span};

    /// Span covering one input file from load to save
    pub fn file_processing(input: &Path, mode: &str) -> Span {
        tracing::span!(
            Level::INFO,
            "file_processing",
            input = %input.display(),
            mode = %mode
        )
    }

    /// Span covering the icon step
    pub fn icon(output: &Path, size: u32) -> Span {
        tracing::span!(Level::INFO, "icon", output = %output.display(), size)
    }
}
