use crate::ServiceInfo;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceState {
    Running,
    Stopped,
    Paused,
    Pending,
}

impl ServiceState {
    pub fn to_str(&self) -> &'static str {
        match self {
            ServiceState::Running => "Running",
            ServiceState::Stopped => "Stopped",
            ServiceState::Paused => "Paused",
            ServiceState::Pending => "Pending",
        }
    }

    /// Maps an OS state string. Transitional (`Start Pending`, ...) and
    /// unrecognised values map to `Pending`.
    pub fn from_os(s: &str) -> Self {
        match s.trim() {
            "Running" => ServiceState::Running,
            "Stopped" => ServiceState::Stopped,
            "Paused" => ServiceState::Paused,
            _ => ServiceState::Pending,
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartupType {
    Automatic,
    Manual,
    Disabled,
    System,
    Boot,
}

impl StartupType {
    pub fn to_str(&self) -> &'static str {
        match self {
            StartupType::Automatic => "Automatic",
            StartupType::Manual => "Manual",
            StartupType::Disabled => "Disabled",
            StartupType::System => "System",
            StartupType::Boot => "Boot",
        }
    }

    /// Maps an OS start mode. Unrecognised values map to `Manual`.
    pub fn from_os(s: &str) -> Self {
        match s.trim() {
            "Auto" | "Automatic" => StartupType::Automatic,
            "Disabled" => StartupType::Disabled,
            "System" => StartupType::System,
            "Boot" => StartupType::Boot,
            _ => StartupType::Manual,
        }
    }
}

impl std::fmt::Display for StartupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// One service tuple as reported by the OS, before name normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub name: Arc<str>,
    pub display_name: Arc<str>,
    pub state: ServiceState,
    pub startup_type: StartupType,
}

impl ServiceEntry {
    pub fn new(
        name: &str,
        display_name: &str,
        state: ServiceState,
        startup_type: StartupType,
    ) -> Self {
        Self {
            name: Arc::from(name),
            display_name: Arc::from(display_name),
            state,
            startup_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: Arc<str>,
    pub display_name: Arc<str>,
    pub state: ServiceState,
    pub startup_type: StartupType,
    pub info: ServiceInfo,
}

impl ServiceRecord {
    /// Builds a record from an OS entry; `name` must already be normalized.
    pub fn from_entry(name: Arc<str>, entry: ServiceEntry, info: ServiceInfo) -> Self {
        Self {
            name,
            display_name: entry.display_name,
            state: entry.state,
            startup_type: entry.startup_type,
            info,
        }
    }

    pub fn apply_entry(&mut self, entry: &ServiceEntry) {
        self.state = entry.state;
        self.startup_type = entry.startup_type;
    }
}
