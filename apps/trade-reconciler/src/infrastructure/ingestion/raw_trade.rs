//! Lenient raw trade rows.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::domain::shared::TradeId;
use crate::domain::trade::{EquityTrade, FxTrade, InstrumentClass, TradeRecord};

/// Ingestion errors.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The trade file could not be read.
    #[error("Failed to read trade file {path}: {source}")]
    ReadError {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("Failed to parse trade JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The document is JSON but not a trade list.
    #[error("Unexpected trade document shape: {0}")]
    ShapeError(String),
}

/// A trade row as uploaded, before coalescing.
///
/// Numeric fields accept JSON numbers and numeric strings; anything else is
/// treated as absent. Numbers beyond the `Decimal` range are clamped to it.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTradeRecord {
    /// Trade identifier. Numbers are accepted and stringified.
    #[serde(deserialize_with = "lenient_string")]
    pub trade_id: Option<String>,
    /// `equity` or `fx`; anything else is FX.
    #[serde(deserialize_with = "lenient_string")]
    pub data_source: Option<String>,
    /// Counterparty name.
    #[serde(deserialize_with = "lenient_string")]
    pub counterparty: Option<String>,
    /// Quote currency.
    #[serde(deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    /// FX base currency.
    #[serde(deserialize_with = "lenient_string")]
    pub base_currency: Option<String>,
    /// Generic commission column.
    #[serde(deserialize_with = "lenient_decimal")]
    pub commission: Option<Decimal>,
    /// Equity taxes.
    #[serde(deserialize_with = "lenient_decimal")]
    pub taxes: Option<Decimal>,
    /// Equity total cost.
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_cost: Option<Decimal>,
    /// FX commission column.
    #[serde(deserialize_with = "lenient_decimal")]
    pub commission_amount: Option<Decimal>,
    /// FX custody fee.
    #[serde(deserialize_with = "lenient_decimal")]
    pub custody_fee: Option<Decimal>,
    /// FX settlement cost.
    #[serde(deserialize_with = "lenient_decimal")]
    pub settlement_cost: Option<Decimal>,
    /// FX brokerage fee.
    #[serde(deserialize_with = "lenient_decimal")]
    pub brokerage_fee: Option<Decimal>,
}

impl From<RawTradeRecord> for TradeRecord {
    fn from(raw: RawTradeRecord) -> Self {
        let trade_id = TradeId::new(raw.trade_id.unwrap_or_default());
        let counterparty = raw.counterparty.unwrap_or_default();
        let class = InstrumentClass::from_data_source(raw.data_source.as_deref().unwrap_or(""));

        match class {
            InstrumentClass::Equity => Self::Equity(EquityTrade {
                trade_id,
                counterparty,
                currency: raw.currency,
                commission: raw.commission.unwrap_or_default(),
                taxes: raw.taxes.unwrap_or_default(),
                total_cost: raw.total_cost,
            }),
            InstrumentClass::Fx => Self::Fx(FxTrade {
                trade_id,
                counterparty,
                currency: raw.currency,
                base_currency: raw.base_currency,
                commission_amount: raw
                    .commission_amount
                    .or(raw.commission)
                    .unwrap_or_default(),
                custody_fee: raw.custody_fee.unwrap_or_default(),
                settlement_cost: raw.settlement_cost.unwrap_or_default(),
                brokerage_fee: raw.brokerage_fee.unwrap_or_default(),
            }),
        }
    }
}

/// Parse a trade document: a JSON array of rows, or an object with a
/// `trades` array.
///
/// # Errors
///
/// Returns an error if the text is not JSON or has neither shape.
pub fn parse_trades_json(text: &str) -> Result<Vec<TradeRecord>, IngestError> {
    let document: Value = serde_json::from_str(text)?;
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("trades") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(IngestError::ShapeError(
                    "expected an array or an object with a `trades` array".to_string(),
                ));
            }
        },
        other => {
            return Err(IngestError::ShapeError(format!(
                "expected an array, got {}",
                json_kind(&other)
            )));
        }
    };

    rows.into_iter()
        .map(|row| {
            serde_json::from_value::<RawTradeRecord>(row)
                .map(TradeRecord::from)
                .map_err(IngestError::from)
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if let Ok(value) = Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)) {
        return Some(value);
    }

    // Finite numbers that do not fit are clamped to the representable range.
    let float = text.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if float.abs() < 1.0 {
        return None;
    }
    let clamped = if float.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    warn!(value = text, clamped = %clamped, "Trade amount outside decimal range, clamped");
    Some(clamped)
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_decimal(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
