//! Output modes
//!
//! Selects which directives the generator emits for each surviving domain.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which dnsmasq directives to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// `server=` and `ipset=` lines for every domain
    #[default]
    Both,
    /// Only `server=` lines
    Server,
    /// Only `ipset=` lines
    Ipset,
}

impl OutputMode {
    /// Get mode name as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Both => "both",
            OutputMode::Server => "server",
            OutputMode::Ipset => "ipset",
        }
    }

    /// Whether `server=` directives are emitted
    pub fn emits_server(&self) -> bool {
        matches!(self, OutputMode::Both | OutputMode::Server)
    }

    /// Whether `ipset=` directives are emitted
    pub fn emits_ipset(&self) -> bool {
        matches!(self, OutputMode::Both | OutputMode::Ipset)
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "both" => Ok(OutputMode::Both),
            "server" => Ok(OutputMode::Server),
            "ipset" => Ok(OutputMode::Ipset),
            _ => Err(Error::InvalidMode { mode: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("both".parse::<OutputMode>().unwrap(), OutputMode::Both);
        assert_eq!("SERVER".parse::<OutputMode>().unwrap(), OutputMode::Server);
        assert_eq!("Ipset".parse::<OutputMode>().unwrap(), OutputMode::Ipset);
        assert!("all".parse::<OutputMode>().is_err());
        assert!("".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_mode_emits() {
        assert!(OutputMode::Both.emits_server());
        assert!(OutputMode::Both.emits_ipset());
        assert!(OutputMode::Server.emits_server());
        assert!(!OutputMode::Server.emits_ipset());
        assert!(!OutputMode::Ipset.emits_server());
        assert!(OutputMode::Ipset.emits_ipset());
    }

    #[test]
    fn test_mode_display_roundtrip() {
        for mode in [OutputMode::Both, OutputMode::Server, OutputMode::Ipset] {
            assert_eq!(mode.to_string().parse::<OutputMode>().unwrap(), mode);
        }
    }
}
