use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON file mapping service name to its stored metadata
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,

    /// Append-only log of disable actions
    #[serde(default = "default_audit_log_path")]
    pub audit_log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
            audit_log_path: default_audit_log_path(),
        }
    }
}

fn default_metadata_path() -> String {
    "public/services-info.json".to_string()
}

fn default_audit_log_path() -> String {
    "logs/services-disabling.log".to_string()
}
