//! Strongly-typed trade identifier.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Placeholder substituted for absent or empty trade identifiers.
pub const DEFAULT_TRADE_ID: &str = "DEFAULT";

/// Unique key of a captured trade.
///
/// Never empty: constructing from an empty string yields [`DEFAULT_TRADE_ID`],
/// so every downstream hash has something stable to work with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TradeId(String);

impl TradeId {
    /// Create a new identifier, substituting the placeholder for empty input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self(DEFAULT_TRADE_ID.to_string())
        } else {
            Self(value)
        }
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the placeholder identifier.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == DEFAULT_TRADE_ID
    }
}

impl Default for TradeId {
    fn default() -> Self {
        Self(DEFAULT_TRADE_ID.to_string())
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TradeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TradeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for TradeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for TradeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<TradeId> for String {
    fn from(value: TradeId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_id_keeps_value() {
        let id = TradeId::new("TRD001");
        assert_eq!(id.as_str(), "TRD001");
        assert_eq!(id.to_string(), "TRD001");
        assert!(!id.is_placeholder());
    }

    #[test]
    fn empty_trade_id_becomes_placeholder() {
        let id = TradeId::new("");
        assert_eq!(id.as_str(), DEFAULT_TRADE_ID);
        assert!(id.is_placeholder());
        assert_eq!(TradeId::default(), id);
    }

    #[test]
    fn trade_id_deserializes_empty_as_placeholder() {
        let id: TradeId = serde_json::from_str("\"\"").unwrap();
        assert!(id.is_placeholder());

        let id: TradeId = serde_json::from_str("\"FX-1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"FX-1\"");
    }
}
