//! Logging initialization with environment-based formatters
//!
//! - Production: Structured JSON logs for cloud monitoring
//! - Sandbox: Colorful, human-readable logs for development
//! - Optional plain-text copy in a size-capped log file (5 MB, 3 backups)

pub mod rotating;

pub use rotating::RotatingFile;

use crate::config::get_environment;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging based on the environment
///
/// `RUST_LOG` takes precedence over `level`. When `log_file` is given, every
/// event is also written to that file without colors, rolling over to
/// `<file>.1`..`<file>.3` every 5 MB.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let env = get_environment();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = RotatingFile::open(
                path,
                rotating::DEFAULT_MAX_BYTES,
                rotating::DEFAULT_BACKUPS,
            )?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let is_production = matches!(env.as_str(), "production" | "prod");

    if is_production {
        // Production: Structured JSON logs
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(io::stdout),
            )
            .init();
    } else {
        // Sandbox/Development: Colorful, human-readable logs
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(true)
                    .with_writer(io::stdout),
            )
            .init();
    }

    Ok(())
}
