//! # dnsset Core
//!
//! Converts ad-blocker style domain feeds (gfwlist, AutoProxy, Adblock
//! Plus syntax, optionally base64-encoded) into dnsmasq `server=` and
//! `ipset=` directives.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Normalization** - base64 detection and rule splitting
//! - **Extraction** - rule text to canonical domain
//! - **Filtering** - `@@` whitelist collection
//! - **Generation** - deduplicated directives per output mode
//! - **Rendering** - sorting, pair counting and the file header
//! - **Configuration** - TOML configuration with defaults
//!
//! ## Example
//!
//! ```rust,no_run
//! use dnsset_core::{Config, Pipeline};
//!
//! let config = Config::load("dnsset.toml")?;
//! let feed = std::fs::read(&config.input.path)?;
//!
//! let report = Pipeline::from_config(&config).run(&feed);
//! std::fs::write(&config.output.path, report.render())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod generate;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-exports for convenience
pub use config::{Config, OutputMode};
pub use error::{Error, Result};
pub use extract::{extract, Domain};
pub use filter::Whitelist;
pub use generate::{OutputLine, Stats, Target};
pub use pipeline::Pipeline;
pub use render::Report;
pub use source::{Feed, FeedFetcher};
