use std::env;

use anyhow::Result;

/// Which submission store backs the CLI.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// SQLite file at `db_path` (default, requires the `sqlite` feature)
    Sqlite,
    /// In-process only; the collection lives for one command
    Memory,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub store_backend: StoreBackend,
    /// Seed for sentiment jitter and mock data. Unset means OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only a malformed PULSE_SEED is an error.
    pub fn load() -> Result<Self> {
        let store_backend = match env::var("PULSE_STORE").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            // "sqlite" or unset both default to SQLite
            _ => StoreBackend::Sqlite,
        };

        let seed = match env::var("PULSE_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_seed(&raw)?),
            _ => None,
        };

        Ok(Self {
            db_path: env::var("PULSE_DB_PATH").unwrap_or_else(|_| "./pulse.db".to_string()),
            store_backend,
            seed,
        })
    }
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| {
        anyhow::anyhow!(
            "PULSE_SEED must be an unsigned integer, got {:?}.\n\
             Unset it to use a random seed.",
            raw
        )
    })
}
