//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use dnsset_core::config::{parse_port, OutputMode};
use std::path::PathBuf;

/// dnsset - ad-blocker feed to dnsmasq converter
///
/// Reads a gfwlist/AutoProxy style rule feed (plain or base64-encoded),
/// drops `@@` exempted domains and writes `server=` and `ipset=`
/// directives for every remaining domain.
#[derive(Parser, Debug)]
#[command(name = "dnsset")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input rule file; fetched from the feed URL first when left at the default
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output dnsmasq configuration file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// DNS server used in `server=` directives
    #[arg(short = 's', long, value_name = "HOST")]
    pub server: Option<String>,

    /// DNS server port (53 or an empty value writes no port)
    #[arg(short = 'p', long, value_name = "PORT", value_parser = port_arg)]
    pub port: Option<PortArg>,

    /// ipset name used in `ipset=` directives
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Author written into the output header
    #[arg(short = 'w', long, value_name = "NAME")]
    pub author: Option<String>,

    /// Directives to generate: both, server or ipset
    #[arg(short = 'm', long, value_name = "MODE", value_parser = mode_arg)]
    pub mode: Option<OutputMode>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Feed URL to download from
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Never download the feed
    #[arg(long)]
    pub no_fetch: bool,

    /// Extra domain or rule to exempt (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "DOMAIN")]
    pub exclude: Vec<String>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only, no summary)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON lines
    Json,
    /// Compact text
    Compact,
}

/// Parsed `--port` value; `None` when given as an empty string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortArg(pub Option<u16>);

fn port_arg(value: &str) -> Result<PortArg, dnsset_core::Error> {
    parse_port(value).map(PortArg)
}

fn mode_arg(value: &str) -> Result<OutputMode, dnsset_core::Error> {
    value.parse()
}
