//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events; binaries and tests that
//! want to see them install a subscriber with [`init_subscriber`].
//!
//! ```rust,no_run
//! use groq_runtime_adapter::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! # Ok::<(), groq_runtime_adapter::error::AdapterError>(())
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

use crate::error::{AdapterError, Result};

pub const LOG_LEVEL_ENV: &str = "GROQ_ADAPTER_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "GROQ_ADAPTER_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "GROQ_ADAPTER_LOG_FILE";

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// One JSON object per line, fields nested under `fields`
    Json,
    /// One JSON object per line, fields flattened into the top level
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            _ => Err(AdapterError::ConfigurationError(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub log_level: tracing::Level,
    pub output_format: OutputFormat,
    /// Write to stdout
    pub enable_console: bool,
    /// Also write to this file (appended, never rotated)
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Debug level, text on stdout
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Default::default()
        }
    }

    /// Warnings and errors as JSON into `log_file`
    pub fn production(log_file: PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Json,
            enable_console: false,
            log_file: Some(log_file),
        }
    }

    fn filter_directive(&self) -> String {
        let level = self.log_level.as_str().to_lowercase();
        format!("groq_runtime_adapter={level}")
    }
}

/// Builder for [`SubscriberConfig`]
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string (trace, debug, info, warn, error)
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = level.trim().parse::<tracing::Level>().map_err(|_| {
            AdapterError::ConfigurationError(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(level);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

fn file_writer(path: &std::path::Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path.file_name().ok_or_else(|| {
        AdapterError::ConfigurationError(format!("log file path has no file name: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::path::Path::new("."),
    };
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Install a global tracing subscriber.
///
/// Returns the file writer guard when `log_file` is set; keep it alive for
/// as long as logs should be flushed. Calling this when a subscriber is
/// already installed is not an error and installs nothing.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| AdapterError::ConfigurationError(format!("Invalid log filter: {e}")))?;

    let (writer, guard, ansi) = match (&config.log_file, config.enable_console) {
        (Some(path), true) => {
            let (file, guard) = file_writer(path)?;
            (BoxMakeWriter::new(std::io::stdout.and(file)), Some(guard), false)
        }
        (Some(path), false) => {
            let (file, guard) = file_writer(path)?;
            (BoxMakeWriter::new(file), Some(guard), false)
        }
        (None, true) => (BoxMakeWriter::new(std::io::stdout), None, true),
        (None, false) => (BoxMakeWriter::new(std::io::sink), None, false),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    let init_result = match config.output_format {
        OutputFormat::Text => builder.try_init(),
        OutputFormat::Json => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .try_init(),
        OutputFormat::JsonCompact => builder
            .with_thread_ids(true)
            .with_thread_names(true)
            .json()
            .flatten_event(true)
            .try_init(),
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            if e.to_string().contains("global default trace dispatcher has already been set") {
                Ok(None)
            } else {
                Err(AdapterError::ConfigurationError(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Initialize with the default configuration
pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

/// Initialize from `GROQ_ADAPTER_LOG_LEVEL`, `GROQ_ADAPTER_LOG_FORMAT`
/// (text, json, json-compact) and `GROQ_ADAPTER_LOG_FILE`.
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(config_from_env()?)
}

fn config_from_env() -> Result<SubscriberConfig> {
    let mut builder = SubscriberConfig::builder();
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
        builder = builder.log_level_str(&level)?;
    }
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        builder = builder.output_format(format.parse()?);
    }
    if let Ok(file) = std::env::var(LOG_FILE_ENV) {
        builder = builder.log_file(PathBuf::from(file));
    }
    Ok(builder.build())
}
