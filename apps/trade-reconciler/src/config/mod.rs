//! Configuration module for the trade reconciler.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before use.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trade_reconciler::config::load_config;
//!
//! let config = load_config(Some("reconciler.yaml"))?;
//! let runner = config.reconciliation.batch_reconciler();
//! ```

mod observability;
mod reconciliation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use reconciliation::ReconciliationConfig;

/// Default configuration path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Cannot read reconciler config '{path}': {source}")]
    ReadError {
        /// File that was requested.
        path: String,
        /// I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`].
    #[error("Invalid reconciler config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// A value is out of range.
    #[error("Invalid reconciler config: {0}")]
    ValidationError(String),
}

/// Reconciler configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Batch and tolerance settings.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// Logging settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Loading
// ============================================

/// Read, interpolate, parse, and validate a YAML config file.
///
/// `None` reads [`DEFAULT_CONFIG_PATH`].
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_string(),
        source,
    })?;

    load_config_from_string(&yaml)
}

/// Interpolate, parse, and validate YAML text.
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let config = serde_yaml_bw::from_str::<Config>(&interpolate_env_vars(yaml))?;
    validate_config(&config)?;
    Ok(config)
}

/// Expand `${VAR}` and `${VAR:-default}` from the process environment.
///
/// Unset or empty variables take the default, or the empty string.
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;
    static ENV_VAR_REGEX: OnceLock<Option<regex::Regex>> = OnceLock::new();

    let Some(re) = ENV_VAR_REGEX
        .get_or_init(|| regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").ok())
    else {
        return input.to_string();
    };

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Range checks that serde cannot express.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.reconciliation.tolerance.is_sign_negative() {
        return Err(ConfigError::ValidationError(
            "reconciliation.tolerance must not be negative".to_string(),
        ));
    }

    if config.reconciliation.chunk_size == 0 {
        return Err(ConfigError::ValidationError(
            "reconciliation.chunk_size must be at least 1".to_string(),
        ));
    }

    let format = config.observability.logging.format.to_lowercase();
    if !LOG_FORMATS.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.reconciliation.tolerance, dec!(0.01));
        assert_eq!(config.reconciliation.chunk_size, 50);
        assert!(config.reconciliation.yield_between_chunks);
        assert!(!config.reconciliation.parallel);
        assert_eq!(config.observability.logging.level, "info");
        assert!(config.observability.logging.is_json());
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = load_config_from_string("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn sections_override_defaults() {
        let yaml = r"
reconciliation:
  tolerance: 0.05
  chunk_size: 10
  parallel: true
observability:
  logging:
    level: debug
    format: pretty
";
        let config = load_config_from_string(yaml).unwrap();
        assert_eq!(config.reconciliation.tolerance, dec!(0.05));
        assert_eq!(config.reconciliation.chunk_size, 10);
        assert!(config.reconciliation.parallel);
        assert_eq!(config.observability.logging.level, "debug");
        assert!(!config.observability.logging.is_json());

        let runner = config.reconciliation.batch_reconciler();
        assert_eq!(runner.settings().chunk_size, 10);
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let err = load_config_from_string("reconciliation:\n  chunk_size: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_negative_tolerance() {
        let err = load_config_from_string("reconciliation:\n  tolerance: -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let yaml = "observability:\n  logging:\n    format: xml\n";
        let err = load_config_from_string(yaml).unwrap_err();
        assert!(err.to_string().contains("observability.logging.format"));
    }

    #[test]
    fn unset_var_takes_default() {
        let input = "level: ${TRADE_RECONCILER_TEST_NONEXISTENT_VAR:-warn}";
        assert_eq!(interpolate_env_vars(input), "level: warn");
    }

    #[test]
    fn unset_var_without_default_is_empty() {
        let input = "level: ${TRADE_RECONCILER_TEST_NONEXISTENT_VAR}";
        assert_eq!(interpolate_env_vars(input), "level: ");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)]
    fn set_var_wins_over_default() {
        let expanded = interpolate_env_vars("home: ${PATH:-unset}");
        assert_ne!(expanded, "home: unset");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reconciliation:\n  chunk_size: 25").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.reconciliation.chunk_size, 25);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/trade-reconciler.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
