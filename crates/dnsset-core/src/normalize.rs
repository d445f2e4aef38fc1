//! Input normalization
//!
//! Turns the raw feed bytes into one raw rule per entry. Feeds are often
//! published base64-encoded and some concatenate several rules on one line
//! with `|` separators, so both are undone here before any rule is looked at.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Standard alphabet, padding optional
const FEED_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Normalize raw feed bytes into raw rule lines
///
/// Order is preserved and duplicates are kept; empty entries are kept too
/// and skipped by the later stages.
pub fn normalize(raw: &[u8]) -> Vec<String> {
    let working = decode(raw);
    let text = String::from_utf8_lossy(&working);
    split_rules(&text)
}

/// Best-effort base64 decoding
///
/// Returns the decoded bytes when the whole input (ignoring ASCII
/// whitespace) is valid base64 and the result looks like rule text,
/// otherwise the input unchanged.
pub fn decode(raw: &[u8]) -> Cow<'_, [u8]> {
    let compact: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    if compact.is_empty() {
        return Cow::Borrowed(raw);
    }

    match FEED_B64.decode(&compact) {
        Ok(decoded) if looks_like_text(&decoded) => {
            debug!(
                encoded = raw.len(),
                decoded = decoded.len(),
                "Input is base64 encoded"
            );
            Cow::Owned(decoded)
        }
        Ok(_) => {
            trace!("Base64 payload has no rule text, using input as-is");
            Cow::Borrowed(raw)
        }
        Err(e) => {
            trace!(error = %e, "Input is not base64, using as plain text");
            Cow::Borrowed(raw)
        }
    }
}

/// Decoded bytes count as text when they carry a letter or a dot
fn looks_like_text(bytes: &[u8]) -> bool {
    bytes.iter().any(|b| b.is_ascii_alphabetic() || *b == b'.')
}

/// Position inside the rule currently being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    /// Only whitespace so far
    Lead,
    /// A single `@` so far
    OneAt,
    /// Inside the `|` anchor run of an `@@` exemption
    Exemption,
    /// Anything else
    Content,
}

/// Split text into rules on newlines and on `|` separators
///
/// Every `|` separates, except in the anchor run right after a leading
/// `@@`, which stays attached to its exemption rule. Blocking anchors
/// such as `||host^` or `|http://host/` therefore leave empty entries
/// in front of the bare rule.
pub fn split_rules(text: &str) -> Vec<String> {
    let mut rules = Vec::new();

    for line in text.lines() {
        let mut start = 0;
        let mut state = Segment::Lead;

        for (i, c) in line.char_indices() {
            state = match (state, c) {
                (Segment::Exemption, '|') => Segment::Exemption,
                (_, '|') => {
                    rules.push(line[start..i].to_string());
                    start = i + 1;
                    Segment::Lead
                }
                (Segment::Lead, c) if c.is_whitespace() => Segment::Lead,
                (Segment::Lead, '@') => Segment::OneAt,
                (Segment::OneAt, '@') => Segment::Exemption,
                _ => Segment::Content,
            };
        }

        rules.push(line[start..].to_string());
    }

    rules
}
