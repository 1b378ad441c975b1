//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    /// A `funded`/`withdrawn` event arrived without the fields the
    /// contract always emits for that kind.
    #[error("Cannot decode {kind} event: {reason}")]
    EventDecode { kind: &'static str, reason: String },

    /// The stored event log cannot be folded into a funder ledger.
    #[error("Ledger replay failed at event {event_id}: {reason}")]
    LedgerReplay { event_id: i64, reason: String },
}

pub type Result<T> = std::result::Result<T, IndexerError>;
