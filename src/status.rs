// Store status display — location, size, counts, newest pulse.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use crate::config::{Config, StoreBackend};
use crate::db::SubmissionStore;
use crate::stats::format_time_ago;

/// Display store status to the terminal.
pub async fn show(store: &dyn SubmissionStore, config: &Config) -> Result<()> {
    match config.store_backend {
        StoreBackend::Memory => {
            println!("Store: in-memory (pulses last for this command only)");
        }
        StoreBackend::Sqlite => {
            if !Path::new(&config.db_path).exists() {
                println!("Store: not initialized");
                println!("\nRun `pulse init` to set up the database.");
                return Ok(());
            }
            let file_size = std::fs::metadata(&config.db_path)
                .map(|m| format_bytes(m.len()))
                .unwrap_or_else(|_| "unknown".to_string());
            println!("Store: {} ({})", config.db_path, file_size);
        }
    }

    let count = store.count().await?;
    println!("Pulses stored: {count}");

    match store.recent(1).await?.first() {
        Some(newest) => {
            println!(
                "Newest pulse: {} ({})",
                newest.id,
                format_time_ago(Utc::now(), newest.created_at)
            );
        }
        None => {
            println!("Newest pulse: none yet");
            println!("  Run `pulse submit` or `pulse seed` to add some");
        }
    }

    match config.seed {
        Some(seed) => println!("Seed: {seed}"),
        None => println!("Seed: random"),
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
