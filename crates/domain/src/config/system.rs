use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemConfig {
    /// PowerShell executable used for service enumeration and mutation
    #[serde(default = "default_powershell")]
    pub powershell: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            powershell: default_powershell(),
        }
    }
}

fn default_powershell() -> String {
    "powershell".to_string()
}
