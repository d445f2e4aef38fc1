//! Configuration management for dnsset
//!
//! Provides a strongly-typed configuration system with TOML support.
//! Every field has a built-in default, so a configuration file only needs
//! to name the values it changes. Command-line flags are applied on top of
//! the loaded configuration by the CLI.

mod mode;

pub use mode::OutputMode;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name written into generated headers and used for config discovery
pub const TOOL_NAME: &str = "dnsset";

/// Standard DNS port; never written as a suffix
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Feed downloaded when the input path is left at its default
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rule feed settings
    pub input: InputConfig,

    /// Output file settings
    pub output: OutputConfig,

    /// Target resolver for `server=` directives
    pub dns: DnsConfig,

    /// Target set for `ipset=` directives
    pub ipset: IpsetConfig,

    /// Additional exemptions
    pub whitelist: WhitelistConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let server = self.dns.server.trim();
        if server.is_empty() {
            return Err(Error::config_value("dns.server", "Must not be empty"));
        }
        if server.contains(['/', '#']) || server.chars().any(char::is_whitespace) {
            return Err(Error::config_value(
                "dns.server",
                format!("'{server}' cannot be used in a server directive"),
            ));
        }

        if self.dns.port == Some(0) {
            return Err(Error::InvalidPort {
                port: "0".to_string(),
            });
        }

        let name = self.ipset.name.trim();
        if name.is_empty() {
            return Err(Error::config_value("ipset.name", "Must not be empty"));
        }
        if name.contains('/') || name.chars().any(char::is_whitespace) {
            return Err(Error::config_value(
                "ipset.name",
                format!("'{name}' cannot be used in an ipset directive"),
            ));
        }

        if self.input.fetch_timeout_secs == 0 {
            return Err(Error::config_value(
                "input.fetch_timeout_secs",
                "Must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Whether the input path was left at its built-in default
    pub fn input_is_default(&self) -> bool {
        self.input.path == Path::new(InputConfig::DEFAULT_PATH)
    }
}

/// Rule feed settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Local rule file
    pub path: PathBuf,
    /// Feed downloaded into `path` when `path` is the default
    pub url: String,
    /// Allow the download at all
    pub fetch: bool,
    /// Upper bound for the single download attempt
    pub fetch_timeout_secs: u64,
}

impl InputConfig {
    /// Conventional local filename for the feed
    pub const DEFAULT_PATH: &'static str = "gfwlist.txt";
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(Self::DEFAULT_PATH),
            url: DEFAULT_FEED_URL.to_string(),
            fetch: true,
            fetch_timeout_secs: 30,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Generated dnsmasq configuration file
    pub path: PathBuf,
    /// Directive selection
    pub mode: OutputMode,
    /// Label written into the header
    pub author: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dnsmasq_gfwlist_ipset.conf"),
            mode: OutputMode::Both,
            author: TOOL_NAME.to_string(),
        }
    }
}

/// Target resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Resolver address
    pub server: String,
    /// Resolver port, `None` behaves like the standard port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl DnsConfig {
    /// Suffix appended to `server=` directives (`#<port>`), if any
    pub fn port_suffix(&self) -> Option<u16> {
        self.port.filter(|&p| p != DEFAULT_DNS_PORT)
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            server: "127.0.0.1".to_string(),
            port: Some(DEFAULT_DNS_PORT),
        }
    }
}

/// Target ipset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpsetConfig {
    /// Set name
    pub name: String,
}

impl Default for IpsetConfig {
    fn default() -> Self {
        Self {
            name: "gfwlist".to_string(),
        }
    }
}

/// Extra exemptions applied in addition to `@@` rules in the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Rules or domains, normalized through the extractor
    pub extra: Vec<String>,
}

/// Parse a DNS port given as text
///
/// An empty string means "no port" and yields `None`.
pub fn parse_port(value: &str) -> Result<Option<u16>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<u16>() {
        Ok(0) | Err(_) => Err(Error::InvalidPort {
            port: value.to_string(),
        }),
        Ok(port) => Ok(Some(port)),
    }
}
