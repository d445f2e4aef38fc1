//! Logging initialization
//!
//! Everything goes to stderr; stdout is reserved for the run summary and
//! `--print-config`.

use anyhow::{Context, Result};
use std::io;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::args::{Args, LogFormat};

/// Initialize logging based on CLI arguments
pub fn init(args: &Args) -> Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let log_file = args
        .log_file
        .as_ref()
        .map(|path| {
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))
        })
        .transpose()?;

    match args.log_format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(args.verbose >= 2),
            );

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                    .try_init()?;
            } else {
                subscriber.try_init()?;
            }
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(io::stderr));

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().json().with_writer(Mutex::new(file)))
                    .try_init()?;
            } else {
                subscriber.try_init()?;
            }
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(io::stderr));

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().compact().with_ansi(false).with_writer(Mutex::new(file)))
                    .try_init()?;
            } else {
                subscriber.try_init()?;
            }
        }
    }

    Ok(())
}
