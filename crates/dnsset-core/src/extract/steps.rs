//! Individual extraction steps
//!
//! Each step is a total, side-effect free string transform or check.
//! [`super::extract`] runs them in a fixed order; they are public so they
//! can be tested and reused one at a time.

/// Characters that can never be part of an extracted domain
const FORBIDDEN: [char; 10] = ['@', '/', ':', '=', ',', '?', '[', ']', '(', ')'];

/// Leading rule-syntax markers (`||`, `|`, `^`, `*.`, `.`)
const RULE_MARKERS: [char; 4] = ['.', '|', '^', '*'];

/// Step 1: surrounding whitespace
pub fn trim(rule: &str) -> &str {
    rule.trim()
}

/// Step 2: leading `scheme://`
///
/// The scheme is one or more letters, digits or `._%+-`.
pub fn strip_scheme(rule: &str) -> &str {
    match rule.find("://") {
        Some(pos) if pos > 0 && rule[..pos].chars().all(is_scheme_char) => &rule[pos + 3..],
        _ => rule,
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

/// Step 3: leading `www.`, any case
pub fn strip_www(rule: &str) -> &str {
    match rule.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("www.") => &rule[4..],
        _ => rule,
    }
}

/// Step 4: path component, from the first `/`
pub fn strip_path(rule: &str) -> &str {
    match rule.find('/') {
        Some(pos) => &rule[..pos],
        None => rule,
    }
}

/// Step 5: leading run of `.`, `|`, `^`, `*`
pub fn strip_markers(rule: &str) -> &str {
    rule.trim_start_matches(RULE_MARKERS)
}

/// Step 6: everything from the first character that cannot be in a hostname
pub fn strip_trailing(rule: &str) -> &str {
    match rule.find(|c: char| !is_host_char(c)) {
        Some(pos) => &rule[..pos],
        None => rule,
    }
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

/// Step 7: lowercase and drop a `:port` suffix
pub fn lowercase_strip_port(rule: &str) -> String {
    let lower = rule.to_ascii_lowercase();
    match lower.find(':') {
        Some(pos) => lower[..pos].to_string(),
        None => lower,
    }
}

/// Step 9: contains a character that can never be part of a domain
pub fn has_forbidden(candidate: &str) -> bool {
    candidate.contains(FORBIDDEN)
}

/// Step 10: four dot-separated groups of decimal digits
///
/// Octet ranges are not checked, so `999.999.999.999` also matches.
pub fn is_ipv4_literal(candidate: &str) -> bool {
    let mut groups = 0;
    for group in candidate.split('.') {
        groups += 1;
        if groups > 4 || group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    groups == 4
}

/// Step 11: at least one `.`
pub fn has_dot(candidate: &str) -> bool {
    candidate.contains('.')
}

/// Step 12: keep only `[a-z0-9.-]`
pub fn clean(candidate: &str) -> String {
    candidate
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("  example.com\t"), "example.com");
        assert_eq!(trim("   "), "");
    }

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://example.com/x"), "example.com/x");
        assert_eq!(strip_scheme("svn+ssh://example.com"), "example.com");
        assert_eq!(strip_scheme("example.com"), "example.com");
        // Empty scheme is not a scheme
        assert_eq!(strip_scheme("://example.com"), "://example.com");
        // Anything outside the scheme alphabet blocks the strip
        assert_eq!(strip_scheme("|http://example.com"), "|http://example.com");
    }

    #[test]
    fn test_strip_www() {
        assert_eq!(strip_www("www.example.com"), "example.com");
        assert_eq!(strip_www("WWW.Example.com"), "Example.com");
        assert_eq!(strip_www("wwwexample.com"), "wwwexample.com");
        assert_eq!(strip_www("ww"), "ww");
        assert_eq!(strip_www("ww\u{e9}x"), "ww\u{e9}x");
    }

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path("example.com/path?x=1"), "example.com");
        assert_eq!(strip_path("/path"), "");
        assert_eq!(strip_path("example.com"), "example.com");
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("||ads.example.com^"), "ads.example.com^");
        assert_eq!(strip_markers("*.example.com"), "example.com");
        assert_eq!(strip_markers(".^|*example.com"), "example.com");
        assert_eq!(strip_markers("example.com"), "example.com");
    }

    #[test]
    fn test_strip_trailing() {
        assert_eq!(strip_trailing("ads.example.com^"), "ads.example.com");
        assert_eq!(strip_trailing("example.com:8080"), "example.com");
        assert_eq!(strip_trailing("example.com$third-party"), "example.com");
        assert_eq!(strip_trailing("ex_ample.com"), "ex");
        assert_eq!(strip_trailing("b\u{fc}cher.de"), "b");
    }

    #[test]
    fn test_lowercase_strip_port() {
        assert_eq!(lowercase_strip_port("Example.COM"), "example.com");
        assert_eq!(lowercase_strip_port("example.com:443"), "example.com");
    }

    #[test]
    fn test_has_forbidden() {
        for bad in ["user@example.com", "a=b.com", "a,b.com", "a?b", "[a]", "(a)"] {
            assert!(has_forbidden(bad), "{bad} should be forbidden");
        }
        assert!(!has_forbidden("ads-1.example.com"));
    }

    #[test]
    fn test_is_ipv4_literal() {
        assert!(is_ipv4_literal("1.2.3.4"));
        assert!(is_ipv4_literal("192.168.1.1"));
        assert!(is_ipv4_literal("999.999.999.999"));
        assert!(!is_ipv4_literal("1.2.3"));
        assert!(!is_ipv4_literal("1.2.3.4.5"));
        assert!(!is_ipv4_literal("1.2.3.a"));
        assert!(!is_ipv4_literal("1..3.4"));
        assert!(!is_ipv4_literal("1a.example.com"));
    }

    #[test]
    fn test_has_dot() {
        assert!(has_dot("example.com"));
        assert!(!has_dot("localhost"));
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean("ex_am ple.com"), "example.com");
        assert_eq!(clean("a-b.c0m"), "a-b.c0m");
        assert_eq!(clean("___"), "");
    }
}
