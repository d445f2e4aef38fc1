//! Configuration discovery and command-line overrides

use anyhow::{Context, Result};
use dnsset_core::config::{Config, TOOL_NAME};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::args::Args;

/// Config file looked for in the working directory
const LOCAL_CONFIG: &str = "dnsset.toml";

/// Candidate config file locations, in search order
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
    if let Some(dirs) = directories::ProjectDirs::from("", "", TOOL_NAME) {
        paths.push(dirs.config_dir().join("config.toml"));
    }
    paths
}

/// First existing config file, if any
pub fn find_config_file() -> Option<PathBuf> {
    search_paths().into_iter().find(|p| p.is_file())
}

/// Resolve the effective configuration
///
/// An explicit `--config` must exist; otherwise the first discovered file
/// is used, falling back to built-in defaults. Flags are applied last.
pub fn resolve(args: &Args) -> Result<Config> {
    let mut config = match args.config.clone().or_else(find_config_file) {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            debug!("No configuration file, using defaults");
            Config::default()
        }
    };

    apply_overrides(&mut config, args);
    Ok(config)
}

/// Apply command-line flags on top of `config`
pub fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(ref input) = args.input {
        config.input.path.clone_from(input);
    }
    if let Some(ref url) = args.url {
        config.input.url.clone_from(url);
    }
    if args.no_fetch {
        config.input.fetch = false;
    }
    if let Some(ref output) = args.output {
        config.output.path.clone_from(output);
    }
    if let Some(mode) = args.mode {
        config.output.mode = mode;
    }
    if let Some(ref author) = args.author {
        config.output.author.clone_from(author);
    }
    if let Some(ref server) = args.server {
        config.dns.server.clone_from(server);
    }
    if let Some(port) = args.port {
        config.dns.port = port.0;
    }
    if let Some(ref name) = args.name {
        config.ipset.name.clone_from(name);
    }
    config.whitelist.extra.extend(args.exclude.iter().cloned());
}

/// URL to download the feed from, if a download should be attempted
///
/// Only a feed stored at the default input path is refreshed.
pub fn fetch_url(config: &Config) -> Option<&str> {
    (config.input.fetch && config.input_is_default()).then_some(config.input.url.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dnsset_core::OutputMode;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dnsset").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::from_toml("[dns]\nserver = \"1.1.1.1\"\nport = 5353\n").unwrap();
        apply_overrides(&mut config, &args(&["-s", "9.9.9.9", "-m", "server", "-x", "a.com"]));

        assert_eq!(config.dns.server, "9.9.9.9");
        assert_eq!(config.dns.port, Some(5353));
        assert_eq!(config.output.mode, OutputMode::Server);
        assert_eq!(config.whitelist.extra, vec!["a.com"]);
    }

    #[test]
    fn test_empty_port_clears() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(&["-p", ""]));
        assert_eq!(config.dns.port, None);
    }

    #[test]
    fn test_fetch_url() {
        let mut config = Config::default();
        assert!(fetch_url(&config).is_some());

        apply_overrides(&mut config, &args(&["--no-fetch"]));
        assert!(fetch_url(&config).is_none());

        let mut config = Config::default();
        apply_overrides(&mut config, &args(&["-i", "custom.txt"]));
        assert!(fetch_url(&config).is_none());
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        let result = resolve(&args(&["-c", missing.to_str().unwrap()]));
        assert!(result.is_err());
    }

    #[test]
    fn test_search_paths_start_local() {
        assert_eq!(search_paths()[0], PathBuf::from("dnsset.toml"));
    }
}
