//! Trade Source Port (Driven Port)
//!
//! Interface for loading captured trades from ingestion.

use async_trait::async_trait;

use crate::domain::trade::TradeRecord;

/// Trade source error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TradeSourceError {
    /// The source could not be read.
    #[error("Trade source unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// The source was read but its contents are not trade records.
    #[error("Malformed trade data: {message}")]
    Malformed {
        /// Error details.
        message: String,
    },
}

/// Port for loading trades.
#[async_trait]
pub trait TradeSourcePort: Send + Sync {
    /// Load every trade available from this source.
    async fn load_trades(&self) -> Result<Vec<TradeRecord>, TradeSourceError>;
}
