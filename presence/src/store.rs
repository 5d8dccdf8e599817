use std::fs;
use std::path::PathBuf;

use log::*;
use serde_json::Value;

use model::PresenceConfig;

use crate::controller::PresenceError;

/// File-backed store for the presence configuration. Reads fail open to
/// defaults; writes surface their errors, the callers need to see those.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The stored record, with defaults filling any key the file never set.
    /// A missing or unreadable file yields the default record.
    pub fn load(&self) -> PresenceConfig {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if self.path.exists() {
                    warn!("failed to read {}: {}, using defaults", self.path.display(), e);
                }
                return PresenceConfig::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("failed to parse {}: {}, using defaults", self.path.display(), e);
                PresenceConfig::default()
            }
        }
    }

    /// Overlay `patch` onto the stored record, key by key, and re-check the
    /// result against the schema. Nothing touches the disk here; an invalid
    /// patch leaves the file as it was.
    pub fn merge(&self, patch: &Value) -> Result<PresenceConfig, PresenceError> {
        let patch = match patch.as_object() {
            Some(o) => o,
            None => return Err(PresenceError::Validation("expected a JSON object".to_string())),
        };

        let mut merged = match serde_json::to_value(self.load()) {
            Ok(Value::Object(map)) => map,
            _ => return Err(PresenceError::Validation("stored record is not an object".to_string())),
        };

        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }

        let config: PresenceConfig = serde_json::from_value(Value::Object(merged))
            .map_err(|e| PresenceError::Validation(e.to_string()))?;

        Ok(config.normalized())
    }

    pub fn merge_and_save(&self, patch: &Value) -> Result<PresenceConfig, PresenceError> {
        let config = self.merge(patch)?;
        self.save(&config)?;
        Ok(config)
    }

    /// Persist the full record, pretty-printed. Written to a temp file and
    /// renamed into place so readers never see a half-written record.
    pub fn save(&self, config: &PresenceConfig) -> Result<(), PresenceError> {
        let config = config.normalized();

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PresenceError::Storage(format!("creating {}: {}", parent.display(), e)))?;
        }

        let raw = serde_json::to_string_pretty(&config)
            .map_err(|e| PresenceError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .map_err(|e| PresenceError::Storage(format!("writing {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| PresenceError::Storage(format!("renaming into {}: {}", self.path.display(), e)))?;

        debug!("saved presence config to {}", self.path.display());
        Ok(())
    }

    pub fn reset(&self) -> Result<PresenceConfig, PresenceError> {
        let config = PresenceConfig::default();
        self.save(&config)?;
        Ok(config)
    }
}
