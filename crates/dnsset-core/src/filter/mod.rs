//! Rule classification and whitelist management
//!
//! Feeds mix three kinds of lines besides blocking rules:
//! - `!` comments
//! - `[...]` metadata headers
//! - `@@` exemptions, which remove a domain from the output everywhere
//!
//! The whitelist is collected in a separate pass before any output is
//! generated, so an exemption listed after its blocking rule still applies.

mod whitelist;

pub use whitelist::{exemption_target, is_whitelist_rule, Whitelist, WHITELIST_MARKER};

/// Kind of a normalized feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Empty or whitespace only
    Blank,
    /// `!` comment
    Comment,
    /// `[...]` metadata
    Metadata,
    /// `@@` exemption
    Exemption,
    /// Anything else, a candidate for the output
    Block,
}

impl RuleKind {
    /// Classify a raw line
    pub fn of(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            RuleKind::Blank
        } else if line.starts_with('!') {
            RuleKind::Comment
        } else if line.starts_with('[') {
            RuleKind::Metadata
        } else if line.starts_with(WHITELIST_MARKER) {
            RuleKind::Exemption
        } else {
            RuleKind::Block
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind() {
        assert_eq!(RuleKind::of(""), RuleKind::Blank);
        assert_eq!(RuleKind::of("  \t"), RuleKind::Blank);
        assert_eq!(RuleKind::of("! comment"), RuleKind::Comment);
        assert_eq!(RuleKind::of("[AutoProxy 0.2.9]"), RuleKind::Metadata);
        assert_eq!(RuleKind::of("  @@||safe.example.com"), RuleKind::Exemption);
        assert_eq!(RuleKind::of("||ads.example.com^"), RuleKind::Block);
        assert_eq!(RuleKind::of("example.com"), RuleKind::Block);
    }
}
