use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;

/// One line of the disable audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub timestamp: DateTime<Utc>,
    pub service_name: Arc<str>,
}

impl AuditLogEntry {
    pub fn new(service_name: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            service_name: Arc::from(service_name),
        }
    }

    pub fn at(timestamp: DateTime<Utc>, service_name: &str) -> Self {
        Self {
            timestamp,
            service_name: Arc::from(service_name),
        }
    }

    /// `<ISO timestamp>: <service>\n`
    pub fn to_line(&self) -> String {
        format!(
            "{}: {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.service_name
        )
    }
}
