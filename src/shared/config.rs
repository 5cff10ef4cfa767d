use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub sync: SyncConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Run the periodic reconciliation timer.
    pub auto_sync: bool,
    pub sync_interval_secs: u64,
    /// Validation rejections beyond this count are quarantined.
    pub max_retries: u32,
    /// Wait after a reachable transition before triggering sync,
    /// so a flapping link does not fire spurious passes.
    pub settle_delay_ms: u64,
    pub reconnect_delay_secs: u64,
    /// Cadence of the full refetch that backstops the realtime channel.
    pub refetch_interval_secs: u64,
    /// Bounded wait for a geolocation fix at capture time.
    pub location_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub max_connections: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            auto_sync: true,
            sync_interval_secs: 300,
            max_retries: 3,
            settle_delay_ms: 1000,
            reconnect_delay_secs: 5,
            refetch_interval_secs: 600,
            location_timeout_secs: 8,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("./data"))
            .join("canvass");
        Self {
            data_dir,
            max_connections: 5,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl StorageConfig {
    pub fn database_url(&self) -> String {
        format!(
            "sqlite://{}?mode=rwc",
            self.data_dir.join("canvass.db").display()
        )
    }
}
