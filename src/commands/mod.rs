//! Command implementations for the CLI
//!
//! - calculate: Compare the simple and full round trips
//! - address: Register, delete and list addresses
//! - history: List or clear recent calculations
//! - pinned: List, add or clear pinned calculations
//! - test: Test configuration validity

pub mod address;
pub mod calculate;
pub mod history;
pub mod pinned;
pub mod render;

use anyhow::Result;
use colored::Colorize;
use reqwest::Client;
use std::sync::Arc;
use vectura::config::Config;
use vectura::providers::GoogleGeocodingClient;
use vectura::storage::{
    AddressRepository, FileBackend, HistoryStore, Outcome, PinnedStore,
};

/// Shared HTTP client for provider calls
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("vectura/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub fn address_repository(cfg: &Config, client: Client) -> AddressRepository {
    AddressRepository::new(
        Arc::new(FileBackend::new(cfg.storage.addresses_path())),
        Arc::new(GoogleGeocodingClient::new(client, &cfg.google)),
        cfg.auth.shared_secret.clone(),
    )
}

pub fn history_store(cfg: &Config) -> HistoryStore {
    HistoryStore::new(Arc::new(FileBackend::new(cfg.storage.history_path())))
}

pub fn pinned_store(cfg: &Config) -> PinnedStore {
    PinnedStore::new(Arc::new(FileBackend::new(cfg.storage.pinned_path())))
}

/// Print a successful outcome, or turn a failed one into the command's error
pub fn report(outcome: Outcome) -> Result<()> {
    if outcome.success {
        println!("{} {}", "✓".green(), outcome.message);
        Ok(())
    } else {
        anyhow::bail!(outcome.message)
    }
}
