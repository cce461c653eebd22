use crate::config::LoggingConfig;
use anyhow::Context;
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// `--verbose` forces debug output on stderr. Otherwise RUST_LOG wins over the
/// configured level, and a configured log file replaces stderr. Keep the
/// returned guard alive until exit so buffered lines reach the file.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let log_file = config.file_path().filter(|_| !verbose);
    let (writer, guard) = match log_file.as_deref().and_then(split_log_path) {
        Some((dir, name)) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name.to_string_lossy())
                .build(dir)
                .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };
    let ansi = guard.is_none();

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_ansi(ansi).with_writer(writer))
                .init();
        }
    }

    Ok(guard)
}

fn split_log_path(path: &Path) -> Option<(&Path, &OsStr)> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    Some((dir, path.file_name()?))
}
