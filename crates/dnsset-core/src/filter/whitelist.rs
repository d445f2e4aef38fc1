//! Whitelist collection
//!
//! Gathers every domain exempted by an `@@` rule anywhere in the feed.

use crate::extract::{extract, Domain};
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// Rule prefix marking an exemption
pub const WHITELIST_MARKER: &str = "@@";

/// Set of exempted domains
///
/// Built once before generation starts and only read afterwards, so an
/// exemption applies no matter where in the feed it appears.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    domains: HashSet<Domain>,
}

impl Whitelist {
    /// Create an empty whitelist
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect exemptions from normalized feed lines
    ///
    /// Only lines starting with `@@` (after trimming) are considered.
    pub fn collect<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::new();
        let mut rules = 0usize;

        for line in lines {
            let line = line.as_ref();
            if let Some(target) = exemption_target(line) {
                rules += 1;
                whitelist.add_rule(target);
            }
        }

        info!(
            rules,
            domains = whitelist.len(),
            "Collected whitelist"
        );
        whitelist
    }

    /// Create whitelist with initial entries
    ///
    /// Entries go through the extractor, so rules like `||example.com^`
    /// and plain domains are both accepted.
    pub fn with_domains<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::new();
        whitelist.extend_rules(entries);
        whitelist
    }

    /// Add entries given as rules or domains
    pub fn extend_rules<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            self.add_rule(entry.as_ref());
        }
    }

    /// Extract a domain from a rule and add it
    ///
    /// Returns `true` if a domain was extracted (whether or not it was
    /// already present).
    pub fn add_rule(&mut self, rule: &str) -> bool {
        match extract(rule) {
            Some(domain) => {
                trace!(domain = %domain, "Whitelisted");
                self.domains.insert(domain);
                true
            }
            None => {
                debug!(rule, "Whitelist rule has no domain");
                false
            }
        }
    }

    /// Check if a domain is exempted
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    /// Get number of exempted domains
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Check if whitelist is empty
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Get all domains, sorted
    pub fn domains(&self) -> Vec<&str> {
        let mut result: Vec<&str> = self.domains.iter().map(Domain::as_str).collect();
        result.sort_unstable();
        result
    }
}

/// Whether a raw line is an exemption rule
pub fn is_whitelist_rule(line: &str) -> bool {
    line.trim().starts_with(WHITELIST_MARKER)
}

/// The part of an `@@` rule that names the exempted host
///
/// Strips the marker and one leading anchor (`|`, `^` or `/`). Returns
/// `None` for lines that are not exemptions, and for `@@!` / `@@[` lines.
pub fn exemption_target(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix(WHITELIST_MARKER)?;
    if rest.starts_with(['!', '[']) {
        return None;
    }
    Some(rest.strip_prefix(['|', '^', '/']).unwrap_or(rest))
}
