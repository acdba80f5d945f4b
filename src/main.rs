//! Trade Journal - Entry Point
//!
//! Opens the configured journal storage, rehydrates the persisted
//! session and logs the active user's P/L summary.
//!
//! Wiring sequence:
//! 1. Load config.toml (path from TRADE_JOURNAL_CONFIG) + validate
//! 2. Init tracing (plain or JSON structured logging)
//! 3. Open the key-value backend (file or memory)
//! 4. Open TradingJournal (session rehydration + journal binding)
//! 5. Log the session state and summary statistics

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use trade_journal::adapters::persistence::{FileStore, MemoryStore};
use trade_journal::config::{self, AppConfig, StorageBackend};
use trade_journal::ports::KeyValueStore;
use trade_journal::usecases::TradingJournal;

const CONFIG_ENV: &str = "TRADE_JOURNAL_CONFIG";

fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        config::loader::load_config(&config_path).context("Failed to load configuration")?
    } else {
        AppConfig::default()
    };

    // ── 2. Initialize logging ───────────────────────────────
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.app.log_level));
    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path,
        backend = ?config.storage.backend,
        min_password_len = config.validation.min_password_len,
        "Starting trade journal"
    );

    // ── 3. Open storage backend ─────────────────────────────
    match config.storage.backend {
        StorageBackend::File => {
            let store = FileStore::open(&config.storage.data_dir)
                .context("Failed to open file storage")?;
            report(Arc::new(store), &config)
        }
        StorageBackend::Memory => report(Arc::new(MemoryStore::new()), &config),
    }
}

/// Rehydrate the session over `storage` and log what it holds.
fn report<S: KeyValueStore>(storage: Arc<S>, config: &AppConfig) -> Result<()> {
    let app = TradingJournal::open(storage)
        .context("Failed to open journal")?
        .with_min_password_len(config.validation.min_password_len);

    let Some(user) = app.current_user() else {
        info!("No active session");
        return Ok(());
    };

    let summary = app.journal().summary();
    info!(
        user_id = %user.id,
        username = %user.username,
        trades = summary.total_trades,
        wins = summary.wins,
        losses = summary.losses,
        total_pnl = summary.total_profit_loss,
        win_rate = summary.win_rate,
        notes = app.journal().notes().len(),
        "Active session"
    );

    Ok(())
}
