use serde::{Deserialize, Serialize};

pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 30;

fn default_sync_interval_secs() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuotebookConfig {
    pub version: u32,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    /// Seconds between periodic syncs in `quotebook watch`.
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
}

impl Default for QuotebookConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remote: None,
            sync_interval_secs: DEFAULT_SYNC_INTERVAL_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Collection server root, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
}
