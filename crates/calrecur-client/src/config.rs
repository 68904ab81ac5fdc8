//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/calrecur/config.toml` by default. A missing file yields the
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use calrecur_core::{DEFAULT_MAX_OCCURRENCES, ExpandOptions};
use calrecur_protocol::{AllowedRange, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};

use crate::error::{ClientError, ClientResult};

/// Configuration for the calrecur client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Expander settings.
    pub expansion: ExpansionSettings,

    /// Accepted calendar range.
    pub range: RangeSettings,

    /// Output settings.
    pub output: OutputSettings,
}

/// Expander settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionSettings {
    /// Safety ceiling on generated occurrences per call.
    pub max_occurrences: usize,
}

impl Default for ExpansionSettings {
    fn default() -> Self {
        Self {
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

/// Years every timestamp must fall in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSettings {
    pub min_year: i32,
    pub max_year: i32,
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
        }
    }
}

/// How `expand` prints occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One RFC 3339 instant per line.
    #[default]
    Text,
    /// The `{ "occurrences": [...] }` response body.
    Json,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses a TOML document.
    pub fn parse(content: &str) -> ClientResult<Self> {
        toml::from_str(content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))
    }

    /// Serializes this configuration back to TOML.
    pub fn to_toml(&self) -> ClientResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))
    }

    /// Checks settings that deserialize fine but cannot be used.
    pub fn validate(&self) -> ClientResult<()> {
        if self.expansion.max_occurrences == 0 {
            return Err(ClientError::Config(
                "expansion.max_occurrences must be greater than 0".to_string(),
            ));
        }
        self.allowed_range()?;
        Ok(())
    }

    /// Returns the accepted calendar range.
    pub fn allowed_range(&self) -> ClientResult<AllowedRange> {
        AllowedRange::from_years(self.range.min_year, self.range.max_year)
            .map_err(|e| ClientError::Config(format!("invalid [range]: {}", e)))
    }

    /// Returns the expander options.
    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions::default().with_max_occurrences(self.expansion.max_occurrences)
    }

    /// Returns the file a run reads its settings from: `explicit` when
    /// given (`--config` or `CALRECUR_CONFIG`), otherwise the default path.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(Self::default_path, Path::to_path_buf)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calrecur")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let config = ClientConfig::parse("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.expansion.max_occurrences, 10_000);
        assert_eq!(config.range.min_year, 2000);
        assert_eq!(config.range.max_year, 2099);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = ClientConfig::parse(
            r#"
            [range]
            max_year = 2050

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.range.min_year, 2000);
        assert_eq!(config.range.max_year, 2050);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.expansion.max_occurrences, 10_000);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "debug = true\n[expansion]\nmax_occurrences = 500").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert!(config.debug);
        assert_eq!(config.expand_options().max_occurrences, 500);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn invalid_toml_fails() {
        let err = ClientConfig::parse("[expansion\nmax_occurrences = 1").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn unknown_output_format_fails() {
        assert!(ClientConfig::parse("[output]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn validate_rejects_zero_ceiling() {
        let mut config = ClientConfig::default();
        config.expansion.max_occurrences = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_reversed_years() {
        let mut config = ClientConfig::default();
        config.range.min_year = 2090;
        config.range.max_year = 2010;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("invalid [range]"));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = ClientConfig::default();
        config.output.format = OutputFormat::Json;
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("format = \"json\""));
        assert_eq!(ClientConfig::parse(&toml).unwrap(), config);
    }

    #[test]
    fn explicit_path_wins() {
        let explicit = Path::new("/tmp/calrecur-test/custom.toml");
        assert_eq!(ClientConfig::resolve_path(Some(explicit)), explicit);
        assert_eq!(ClientConfig::resolve_path(None), ClientConfig::default_path());
    }

    #[test]
    fn default_path_ends_with_config_toml() {
        let path = ClientConfig::default_path();
        assert!(path.ends_with("calrecur/config.toml"));
    }
}
