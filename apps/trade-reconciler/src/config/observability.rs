//! Logging settings.

use serde::{Deserialize, Serialize};

/// Log output formats understood by the subscriber.
pub const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// `observability` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ObservabilityConfig {
    /// `observability.logging`.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `observability.logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "info_level")]
    pub level: String,
    /// One of [`LOG_FORMATS`].
    #[serde(default = "json_format")]
    pub format: String,
    /// Emit an event when each span closes.
    #[serde(default = "default_true")]
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: info_level(),
            format: json_format(),
            include_spans: default_true(),
        }
    }
}

impl LoggingConfig {
    /// Returns true for JSON output.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

fn info_level() -> String {
    "info".to_owned()
}

fn json_format() -> String {
    "json".to_owned()
}

pub(super) const fn default_true() -> bool {
    true
}
