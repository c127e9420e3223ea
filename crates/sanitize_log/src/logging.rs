//! Structured logging setup with tracing

use std::path::PathBuf;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Logging options
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Level used when `RUST_LOG` is not set
    pub level: LevelFilter,
    /// Also write JSON logs to a daily file in this directory
    pub log_dir: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            log_dir: None,
        }
    }
}

impl LogOptions {
    /// Map a `-v` count to a level: 0 = warn, 1 = info, 2 = debug, 3+ = trace
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }
}

/// Initialize the logging system
///
/// The returned guard flushes the file writer on drop; keep it alive until
/// the program exits.
pub fn init(options: &LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .boxed();

    let (file, guard) = match &options.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "sanitize.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(options.env_filter())
        .with(console)
        .with(file)
        .try_init()?;

    tracing::debug!(level = %options.level, log_dir = ?options.log_dir, "Logging initialized");
    Ok(guard)
}
