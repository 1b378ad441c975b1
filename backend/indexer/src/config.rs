//! Application configuration loaded from environment variables.

use std::str::FromStr;

use crate::errors::{IndexerError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Soroban RPC endpoint (e.g. https://soroban-testnet.stellar.org)
    pub rpc_url: String,
    /// The FundMe contract address (Strkey contract ID)
    pub contract_id: String,
    /// Path to the SQLite database file
    pub database_url: String,
    /// Port for the REST API server
    pub api_port: u16,
    /// How often (in seconds) to poll the RPC for new events
    pub poll_interval_secs: u64,
    /// Maximum number of events to fetch per RPC request
    pub events_per_page: u32,
    /// Ledger to start from if no cursor is saved
    pub start_ledger: u32,
}

impl Config {
    /// Load and validate the configuration.
    ///
    /// `CONTRACT_ID` is the only required variable and must be a Strkey
    /// contract address; everything else falls back to testnet-friendly
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let config = Config {
            rpc_url: env_or("RPC_URL", "https://soroban-testnet.stellar.org"),
            contract_id: std::env::var("CONTRACT_ID").map_err(|_| {
                IndexerError::Config("CONTRACT_ID environment variable is required".to_string())
            })?,
            database_url: env_or("DATABASE_URL", "sqlite:./fundme_events.db"),
            api_port: parse_env("API_PORT", "3001")?,
            poll_interval_secs: parse_env("POLL_INTERVAL_SECS", "5")?,
            events_per_page: parse_env("EVENTS_PER_PAGE", "100")?,
            start_ledger: parse_env("START_LEDGER", "0")?,
        };

        validate_contract_id(&config.contract_id)?;
        if config.events_per_page == 0 {
            return Err(IndexerError::Config(
                "EVENTS_PER_PAGE must be positive".to_string(),
            ));
        }
        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env_or(key, default)
        .parse()
        .map_err(|_| IndexerError::Config(format!("Invalid {key}")))
}

/// Contract addresses are Strkey contract IDs: 56 base-32 characters
/// (`A`–`Z`, `2`–`7`) starting with `C`. Account IDs (`G...`) and
/// arbitrary strings are rejected up front rather than on the first
/// RPC round-trip.
fn validate_contract_id(id: &str) -> Result<()> {
    let is_base32 = |b: u8| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b);
    if id.len() == 56 && id.starts_with('C') && id.bytes().all(is_base32) {
        Ok(())
    } else {
        Err(IndexerError::Config(format!(
            "CONTRACT_ID {id:?} is not a Strkey contract address"
        )))
    }
}
