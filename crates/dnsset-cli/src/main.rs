//! dnsset CLI
//!
//! Command-line interface for converting rule feeds into dnsmasq
//! `server=`/`ipset=` configuration.

mod args;
mod config;
mod fetch;
mod logging;
mod workfiles;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use dnsset_core::config::Config;
use dnsset_core::source::{acquire, Feed};
use dnsset_core::{Error, Pipeline, Report};
use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

use args::Args;
use fetch::HttpFetcher;
use workfiles::WorkFiles;

/// Exit code for usage errors and general failures
const EXIT_FAILURE: u8 = 1;
/// Exit code when no input file is available
const EXIT_NO_INPUT: u8 = 2;
/// Exit code after Ctrl+C
const EXIT_INTERRUPTED: i32 = 130;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("{}", e.render().ansi());
                return ExitCode::from(EXIT_FAILURE);
            }
        },
    };

    if let Err(e) = logging::init(&args) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(EXIT_FAILURE);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_input_not_found(&e) => {
            error!("{e:#}");
            ExitCode::from(EXIT_NO_INPUT)
        }
        Err(e) => {
            error!("Fatal error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn is_input_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| cause.downcast_ref::<Error>().is_some_and(Error::is_input_not_found))
}

fn run(args: &Args) -> Result<()> {
    let config = config::resolve(args)?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    config.validate().context("Configuration validation failed")?;

    let work = WorkFiles::new();
    let handler_work = work.clone();
    ctrlc::set_handler(move || {
        handler_work.remove_all();
        eprintln!("Interrupted");
        std::process::exit(EXIT_INTERRUPTED);
    })
    .context("Failed to set Ctrl+C handler")?;

    let feed = load_feed(&config, &work)?;

    let report = Pipeline::from_config(&config).run(&feed.bytes);
    info!(
        domains = report.stats.domains,
        directives = report.stats.directives,
        entries = report.entries(),
        "Generated directives"
    );

    work.write(&config.output.path, |file| report.write_to(file))?;
    info!(path = %config.output.path.display(), "Wrote output");

    if !args.quiet {
        print_summary(&config, &report);
    }

    Ok(())
}

/// Download or read the feed, storing a fresh download at the input path
///
/// Nothing on the download side is fatal: without an HTTP client the local
/// file is read, and a download that cannot be stored is still used.
fn load_feed(config: &Config, work: &WorkFiles) -> Result<Feed> {
    let path = &config.input.path;
    let fetcher = config::fetch_url(config).and_then(|url| {
        match HttpFetcher::new(Duration::from_secs(config.input.fetch_timeout_secs)) {
            Ok(fetcher) => Some((url, fetcher)),
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Cannot download feed, using local file");
                None
            }
        }
    });

    let feed = match fetcher {
        Some((url, fetcher)) => acquire(path, Some(url), &fetcher)?,
        None => Feed::read(path)?,
    };

    if feed.is_downloaded() {
        store_download(&feed, work);
    }

    Ok(feed)
}

/// Keep a downloaded feed at its input path; returns whether it was stored
fn store_download(feed: &Feed, work: &WorkFiles) -> bool {
    match work.write(&feed.path, |file| file.write_all(&feed.bytes)) {
        Ok(()) => {
            info!(path = %feed.path.display(), "Stored downloaded feed");
            true
        }
        Err(e) => {
            warn!(error = %format!("{e:#}"), "Cannot store downloaded feed, using it in memory");
            false
        }
    }
}

fn print_summary(config: &Config, report: &Report) {
    let stats = &report.stats;

    println!("{} {}", "✓".green().bold(), "dnsmasq configuration written".bold());
    println!("  Output:       {}", config.output.path.display().to_string().cyan());
    println!("  Mode:         {}", config.output.mode);
    println!("  Domains:      {}", stats.domains.to_string().green());
    println!("  Whitelisted:  {}", stats.whitelist_hits.to_string().yellow());
    println!("  Duplicates:   {}", stats.duplicates);
    println!("  Rejected:     {}", stats.rejected);
    println!("  Entries:      {}", report.entries().to_string().bold());
}
