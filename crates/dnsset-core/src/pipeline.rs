//! Feed processing pipeline
//!
//! Runs the stages in their required order:
//!
//! 1. normalize the raw feed into rule lines
//! 2. collect the whitelist over all lines
//! 3. generate directives, skipping whitelisted domains
//! 4. sort, count pairs and stamp the header
//!
//! The whitelist is finished before generation starts, so exemptions apply
//! to the whole feed regardless of their position in it.

use crate::config::Config;
use crate::filter::Whitelist;
use crate::generate::{Generator, Stats, Target};
use crate::normalize::normalize;
use crate::render::Report;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Feed to directives transform
#[derive(Debug, Clone)]
pub struct Pipeline {
    target: Target,
    author: String,
    extra_whitelist: Vec<String>,
}

impl Pipeline {
    /// Create a pipeline for a target
    pub fn new(target: Target, author: impl Into<String>) -> Self {
        Self {
            target,
            author: author.into(),
            extra_whitelist: Vec::new(),
        }
    }

    /// Create a pipeline from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(Target::from_config(config), config.output.author.clone())
            .with_extra_whitelist(config.whitelist.extra.iter().cloned())
    }

    /// Exempt additional rules or domains on top of the feed's `@@` rules
    pub fn with_extra_whitelist<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.extra_whitelist.extend(entries);
        self
    }

    /// Get the directive target
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Process raw feed bytes, stamping the current time
    pub fn run(&self, raw: &[u8]) -> Report {
        self.run_at(raw, Utc::now())
    }

    /// Process raw feed bytes with a fixed creation time
    #[instrument(skip_all, fields(bytes = raw.len()))]
    pub fn run_at(&self, raw: &[u8], created: DateTime<Utc>) -> Report {
        let lines = normalize(raw);
        debug!(lines = lines.len(), "Normalized feed");

        let mut whitelist = Whitelist::collect(&lines);
        whitelist.extend_rules(&self.extra_whitelist);

        let mut stats = Stats {
            whitelisted_domains: whitelist.len() as u64,
            ..Stats::default()
        };

        let output = Generator::new(&self.target, &whitelist).generate(&lines, &mut stats);

        Report::new(output, self.author.clone(), created, stats)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;

    fn target() -> Target {
        Target {
            mode: OutputMode::Both,
            server: "9.9.9.9".to_string(),
            port: None,
            ipset: "gfw".to_string(),
        }
    }

    #[test]
    fn test_whitelist_after_block_rule() {
        let pipeline = Pipeline::new(target(), "test");
        let report = pipeline.run(b"block.example.com\nother.example.com\n@@||block.example.com\n");

        let lines: Vec<String> = report.lines.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["server=/other.example.com/9.9.9.9", "ipset=/other.example.com/gfw"]
        );
        assert_eq!(report.entries(), 1);
        assert_eq!(report.stats.whitelisted_domains, 1);
    }

    #[test]
    fn test_extra_whitelist() {
        let pipeline = Pipeline::new(target(), "test")
            .with_extra_whitelist(vec!["||other.example.com^".to_string()]);
        let report = pipeline.run(b"block.example.com\nother.example.com\n");

        assert_eq!(report.entries(), 1);
        assert!(report.lines.iter().all(|l| l.domain().as_str() == "block.example.com"));
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.output.author = "someone".to_string();
        config.whitelist.extra = vec!["a.example.com".to_string()];

        let pipeline = Pipeline::from_config(&config);
        let report = pipeline.run(b"a.example.com\nb.example.com\n");
        assert_eq!(report.header.author, "someone");
        assert_eq!(report.entries(), 1);
        assert_eq!(pipeline.target().server, "127.0.0.1");
    }
}
