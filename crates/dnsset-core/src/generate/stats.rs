//! Run statistics

use std::fmt;

/// Counters collected while turning a feed into directives
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Normalized lines seen, blanks included
    pub lines: u64,
    /// Blank, comment and metadata lines
    pub skipped: u64,
    /// `@@` lines
    pub exemption_rules: u64,
    /// Domains in the whitelist
    pub whitelisted_domains: u64,
    /// Blocking rules that produced no domain
    pub rejected: u64,
    /// Blocking rules whose domain was already seen
    pub duplicates: u64,
    /// Distinct domains dropped because they are whitelisted
    pub whitelist_hits: u64,
    /// Distinct domains that produced directives
    pub domains: u64,
    /// Directives produced
    pub directives: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines, {} domains, {} directives, {} whitelisted, {} duplicates, {} rejected",
            self.lines,
            self.domains,
            self.directives,
            self.whitelist_hits,
            self.duplicates,
            self.rejected
        )
    }
}
