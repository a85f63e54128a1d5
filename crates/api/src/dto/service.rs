use servicedex_application::use_cases::RefreshOutcome;
use servicedex_domain::{ServiceInfo, ServiceRecord};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordResponse {
    pub name: String,
    pub display_name: String,
    pub state: &'static str,
    pub startup_type: &'static str,
    pub info: ServiceInfo,
}

impl ServiceRecordResponse {
    pub fn from_entity(record: ServiceRecord) -> Self {
        Self {
            name: record.name.to_string(),
            display_name: record.display_name.to_string(),
            state: record.state.to_str(),
            startup_type: record.startup_type.to_str(),
            info: record.info,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub count: usize,
    pub timestamp: String,
}

impl RefreshResponse {
    pub fn from_outcome(outcome: RefreshOutcome) -> Self {
        Self {
            message: "Services cache refreshed".to_string(),
            count: outcome.count,
            timestamp: outcome.refreshed_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
