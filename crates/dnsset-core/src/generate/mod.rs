//! Directive generation
//!
//! Runs the extractor over every blocking rule, drops repeats and
//! whitelisted domains, and emits dnsmasq directives for what is left:
//!
//! ```text
//! server=/<domain>/<dns_server>[#<port>]
//! ipset=/<domain>/<ipset_name>
//! ```

mod stats;

pub use stats::Stats;

use crate::config::{Config, OutputMode};
use crate::extract::{extract, Domain};
use crate::filter::{RuleKind, Whitelist};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, instrument, trace};

/// One dnsmasq directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// Route queries for `domain` to another resolver
    Server {
        /// Routed domain
        domain: Domain,
        /// Resolver address
        server: String,
        /// Resolver port when it is not the standard one
        port: Option<u16>,
    },
    /// Add resolved addresses of `domain` to an ipset
    Ipset {
        /// Tagged domain
        domain: Domain,
        /// Set name
        name: String,
    },
}

impl OutputLine {
    /// Domain this directive applies to
    pub fn domain(&self) -> &Domain {
        match self {
            OutputLine::Server { domain, .. } | OutputLine::Ipset { domain, .. } => domain,
        }
    }

    /// Whether this is a `server=` directive
    pub fn is_server(&self) -> bool {
        matches!(self, OutputLine::Server { .. })
    }

    /// Whether this is an `ipset=` directive
    pub fn is_ipset(&self) -> bool {
        matches!(self, OutputLine::Ipset { .. })
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLine::Server {
                domain,
                server,
                port: Some(port),
            } => write!(f, "server=/{domain}/{server}#{port}"),
            OutputLine::Server { domain, server, .. } => write!(f, "server=/{domain}/{server}"),
            OutputLine::Ipset { domain, name } => write!(f, "ipset=/{domain}/{name}"),
        }
    }
}

/// Where directives point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Which directives to emit
    pub mode: OutputMode,
    /// Resolver address for `server=`
    pub server: String,
    /// Port suffix for `server=`, `None` for the standard port
    pub port: Option<u16>,
    /// Set name for `ipset=`
    pub ipset: String,
}

impl Target {
    /// Build the target from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: config.output.mode,
            server: config.dns.server.trim().to_string(),
            port: config.dns.port_suffix(),
            ipset: config.ipset.name.trim().to_string(),
        }
    }

    /// Directives for one domain, `server=` first
    pub fn directives(&self, domain: &Domain) -> Vec<OutputLine> {
        let mut lines = Vec::with_capacity(2);
        if self.mode.emits_server() {
            lines.push(OutputLine::Server {
                domain: domain.clone(),
                server: self.server.clone(),
                port: self.port,
            });
        }
        if self.mode.emits_ipset() {
            lines.push(OutputLine::Ipset {
                domain: domain.clone(),
                name: self.ipset.clone(),
            });
        }
        lines
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Turns blocking rules into directives
///
/// The whitelist must be complete before the generator is built.
pub struct Generator<'a> {
    target: &'a Target,
    whitelist: &'a Whitelist,
}

impl<'a> Generator<'a> {
    /// Create a generator for a target and a finished whitelist
    pub fn new(target: &'a Target, whitelist: &'a Whitelist) -> Self {
        Self { target, whitelist }
    }

    /// Generate directives in feed order
    ///
    /// The first occurrence of a domain decides; later rules naming the
    /// same domain are counted as duplicates.
    #[instrument(skip_all, fields(mode = %self.target.mode))]
    pub fn generate<I, S>(&self, lines: I, stats: &mut Stats) -> Vec<OutputLine>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: HashSet<Domain> = HashSet::new();
        let mut output = Vec::new();

        for line in lines {
            let line = line.as_ref();
            stats.lines += 1;

            match RuleKind::of(line) {
                RuleKind::Block => {}
                RuleKind::Exemption => {
                    stats.exemption_rules += 1;
                    continue;
                }
                RuleKind::Blank | RuleKind::Comment | RuleKind::Metadata => {
                    stats.skipped += 1;
                    continue;
                }
            }

            let Some(domain) = extract(line) else {
                stats.rejected += 1;
                continue;
            };

            if seen.contains(&domain) {
                stats.duplicates += 1;
                continue;
            }

            if self.whitelist.contains(domain.as_str()) {
                debug!(domain = %domain, "Domain is whitelisted, skipping");
                stats.whitelist_hits += 1;
                seen.insert(domain);
                continue;
            }

            let directives = self.target.directives(&domain);
            trace!(domain = %domain, count = directives.len(), "Emitting directives");
            stats.domains += 1;
            stats.directives += directives.len() as u64;
            output.extend(directives);
            seen.insert(domain);
        }

        info!(
            domains = stats.domains,
            directives = stats.directives,
            duplicates = stats.duplicates,
            whitelisted = stats.whitelist_hits,
            rejected = stats.rejected,
            "Generated directives"
        );
        output
    }
}
