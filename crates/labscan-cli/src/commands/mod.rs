pub mod batch;
pub mod config;
pub mod history;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use labscan_core::models::config::LabConfig;
use labscan_core::JsonFileStore;

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LabConfig> {
    if let Some(path) = config_path {
        return Ok(LabConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(LabConfig::from_file(&default_path)?)
    } else {
        Ok(LabConfig::default())
    }
}

/// Open the report store, preferring an explicit path over configuration.
pub fn open_store(store: Option<&PathBuf>, config: &LabConfig) -> JsonFileStore {
    let path = store
        .cloned()
        .unwrap_or_else(|| config.history.store_path.clone());

    debug!("Using report store {}", path.display());
    JsonFileStore::new(path).with_max_reports(config.history.max_reports)
}
