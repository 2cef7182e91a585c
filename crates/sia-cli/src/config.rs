//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every field has a default, so
//! an empty file and a missing `--config` behave the same. Command-line
//! flags take precedence over file values.
//!
//! ```yaml
//! format: json
//! log_filter: "sia_policy=debug,warn"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How command output is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bare values, one per line.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// Settings read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Output format when `--format` is not given.
    pub format: OutputFormat,
    /// `EnvFilter` directive used when neither `-v` nor `RUST_LOG` is set.
    pub log_filter: Option<String>,
}

impl CliConfig {
    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse from YAML text. An empty document yields defaults.
    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// The output format after applying a command-line override.
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.unwrap_or(self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_path() {
        let cfg = CliConfig::load(None).unwrap();
        assert_eq!(cfg, CliConfig::default());
        assert_eq!(cfg.format, OutputFormat::Text);
        assert!(cfg.log_filter.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let cfg = CliConfig::from_yaml("format: json\nlog_filter: debug\n").unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(CliConfig::from_yaml("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::from_yaml("  \n").unwrap(), CliConfig::default());
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(CliConfig::from_yaml("colour: true\n").is_err());
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(CliConfig::from_yaml("format: xml\n").is_err());
    }

    #[test]
    fn flag_overrides_file() {
        let cfg = CliConfig {
            format: OutputFormat::Json,
            log_filter: None,
        };
        assert_eq!(cfg.resolve_format(None), OutputFormat::Json);
        assert_eq!(
            cfg.resolve_format(Some(OutputFormat::Text)),
            OutputFormat::Text
        );
    }
}
