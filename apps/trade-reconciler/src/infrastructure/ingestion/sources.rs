//! Trade source adapters.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::raw_trade::{IngestError, parse_trades_json};
use crate::application::ports::{TradeSourceError, TradeSourcePort};
use crate::domain::trade::TradeRecord;

impl From<IngestError> for TradeSourceError {
    fn from(err: IngestError) -> Self {
        match &err {
            IngestError::ReadError { .. } => Self::Unavailable {
                message: err.to_string(),
            },
            IngestError::ParseError(_) | IngestError::ShapeError(_) => Self::Malformed {
                message: err.to_string(),
            },
        }
    }
}

/// Trade source over a fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeSource {
    trades: Vec<TradeRecord>,
}

impl InMemoryTradeSource {
    /// Create a source serving `trades`.
    #[must_use]
    pub const fn new(trades: Vec<TradeRecord>) -> Self {
        Self { trades }
    }
}

#[async_trait]
impl TradeSourcePort for InMemoryTradeSource {
    async fn load_trades(&self) -> Result<Vec<TradeRecord>, TradeSourceError> {
        Ok(self.trades.clone())
    }
}

/// Trade source reading a JSON trade file.
#[derive(Debug, Clone)]
pub struct JsonFileTradeSource {
    path: PathBuf,
}

impl JsonFileTradeSource {
    /// Create a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the trade file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the trade file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a trade document.
    pub async fn read(&self) -> Result<Vec<TradeRecord>, IngestError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| IngestError::ReadError {
                path: self.path.display().to_string(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = text.len(), "Read trade file");

        let trades = parse_trades_json(&text)?;
        info!(path = %self.path.display(), trades = trades.len(), "Loaded trades");
        Ok(trades)
    }
}

#[async_trait]
impl TradeSourcePort for JsonFileTradeSource {
    async fn load_trades(&self) -> Result<Vec<TradeRecord>, TradeSourceError> {
        Ok(self.read().await?)
    }
}
