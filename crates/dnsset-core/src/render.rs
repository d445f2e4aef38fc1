//! Output post-processing
//!
//! Sorts generated directives by domain, counts complete `server`/`ipset`
//! pairs and renders the final file with its header:
//!
//! ```text
//! # Generated by dnsset
//! # Created: Sat, 17 Oct 2026 12:00:00 +0000
//! # Author: dnsset
//! # Entries (server+ipset pairs): 2
//!
//! server=/a.example.com/127.0.0.1
//! ipset=/a.example.com/gfwlist
//! ```

use crate::config::TOOL_NAME;
use crate::generate::{OutputLine, Stats};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

/// Header block written above the directives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Generating tool
    pub tool: String,
    /// Generation time
    pub created: DateTime<Utc>,
    /// Author label
    pub author: String,
    /// Number of complete server+ipset pairs
    pub entries: usize,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by {}", self.tool)?;
        writeln!(f, "# Created: {}", self.created.to_rfc2822())?;
        writeln!(f, "# Author: {}", self.author)?;
        writeln!(f, "# Entries (server+ipset pairs): {}", self.entries)
    }
}

/// Finished output of a run
#[derive(Debug, Clone)]
pub struct Report {
    /// Header block
    pub header: Header,
    /// Directives sorted by domain
    pub lines: Vec<OutputLine>,
    /// Counters from generation
    pub stats: Stats,
}

impl Report {
    /// Sort directives, count pairs and stamp the header
    pub fn new(
        mut lines: Vec<OutputLine>,
        author: impl Into<String>,
        created: DateTime<Utc>,
        stats: Stats,
    ) -> Self {
        sort_lines(&mut lines);
        let entries = count_pairs(&lines);

        Self {
            header: Header {
                tool: TOOL_NAME.to_string(),
                created,
                author: author.into(),
                entries,
            },
            lines,
            stats,
        }
    }

    /// Number of complete server+ipset pairs
    pub fn entries(&self) -> usize {
        self.header.entries
    }

    /// Write the full file contents
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// Render the full file contents
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Stable sort by domain
///
/// Lines for the same domain keep their emission order, so a `server=`
/// line stays directly above its `ipset=` line.
pub fn sort_lines(lines: &mut [OutputLine]) {
    lines.sort_by(|a, b| a.domain().cmp(b.domain()));
}

/// Count domains that have both a `server=` and an `ipset=` line
pub fn count_pairs(lines: &[OutputLine]) -> usize {
    let mut kinds: HashMap<&str, (bool, bool)> = HashMap::new();
    for line in lines {
        let entry = kinds.entry(line.domain().as_str()).or_default();
        if line.is_server() {
            entry.0 = true;
        } else {
            entry.1 = true;
        }
    }
    kinds.values().filter(|(server, ipset)| *server && *ipset).count()
}
