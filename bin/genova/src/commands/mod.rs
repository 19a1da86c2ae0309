pub mod account;
pub mod login;
pub mod marketplace;

use std::sync::Arc;

use anyhow::Result;

use genova_client::ApiClient;
use genova_kv::RedbStore;

use crate::config::CliConfig;

/// Build an API client from the loaded config.
pub fn build_client(config: &CliConfig) -> Result<ApiClient> {
    if config.server.is_empty() {
        anyhow::bail!("No server URL set. Run `genova server <url>`.");
    }

    let data_dir = config.resolve_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let store = RedbStore::open(&data_dir.join("session.redb"))
        .map_err(|e| anyhow::anyhow!("failed to open credential store: {}", e))?;

    Ok(ApiClient::new(&config.server, Arc::new(store)))
}
