use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[allow(unused)]
pub struct StorageConfig {
    pub config_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            config_path: "data/presence.json".to_string(),
        }
    }
}
