//! Instrument class discriminant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument class of a captured trade (the `dataSource` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentClass {
    /// Cash equity trade.
    Equity,
    /// Foreign exchange trade.
    Fx,
}

impl InstrumentClass {
    /// Parse a `dataSource` value. Anything other than `equity` is FX.
    #[must_use]
    pub fn from_data_source(value: &str) -> Self {
        if value == "equity" {
            Self::Equity
        } else {
            Self::Fx
        }
    }

    /// Returns true for equity trades.
    #[must_use]
    pub const fn is_equity(&self) -> bool {
        matches!(self, Self::Equity)
    }
}

impl fmt::Display for InstrumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equity => write!(f, "equity"),
            Self::Fx => write!(f, "fx"),
        }
    }
}
