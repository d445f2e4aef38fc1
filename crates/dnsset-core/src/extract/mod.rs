//! Domain extraction
//!
//! Turns one raw rule in ad-blocker syntax (`||ads.example.com^`,
//! `https://www.example.com/path`, `*.example.com`, ...) into a canonical
//! lowercase domain, or rejects it.
//!
//! Extraction is a fixed chain of the steps in [`steps`]:
//!
//! 1. trim whitespace
//! 2. strip `scheme://`
//! 3. strip `www.`
//! 4. strip the path
//! 5. strip leading `.`, `|`, `^`, `*`
//! 6. cut at the first non-hostname character
//! 7. lowercase, cut at `:`
//! 8. reject empty
//! 9. reject forbidden characters
//! 10. reject IPv4 literals
//! 11. reject names without a dot
//! 12. drop anything outside `[a-z0-9.-]`
//! 13. reject empty
//!
//! The function is total: any input either yields a [`Domain`] or `None`.

pub mod steps;

use std::borrow::Borrow;
use std::fmt;
use tracing::trace;

/// Canonical domain name
///
/// Always non-empty, lowercase, made of `[a-z0-9.-]`, contains a dot and
/// is not an IPv4 literal. Only [`extract`] creates values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(String);

impl Domain {
    /// Extract a domain from a raw rule
    pub fn parse(rule: &str) -> Option<Self> {
        extract(rule)
    }

    /// Get the domain as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Domain {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Extract a canonical domain from a raw rule
pub fn extract(rule: &str) -> Option<Domain> {
    let trimmed = steps::trim(rule);
    if trimmed.is_empty() {
        return None;
    }

    let host = steps::strip_scheme(trimmed);
    let host = steps::strip_www(host);
    let host = steps::strip_path(host);
    let host = steps::strip_markers(host);
    let host = steps::strip_trailing(host);
    let candidate = steps::lowercase_strip_port(host);

    if candidate.is_empty() {
        trace!(rule = trimmed, "Rejected: no hostname");
        return None;
    }
    if steps::has_forbidden(&candidate) {
        trace!(rule = trimmed, "Rejected: forbidden character");
        return None;
    }
    if steps::is_ipv4_literal(&candidate) {
        trace!(rule = trimmed, "Rejected: IPv4 literal");
        return None;
    }
    if !steps::has_dot(&candidate) {
        trace!(rule = trimmed, "Rejected: no dot");
        return None;
    }

    let cleaned = steps::clean(&candidate);
    if cleaned.is_empty() {
        return None;
    }

    Some(Domain(cleaned))
}
