use servicedex_domain::{AuditLogEntry, DomainError, ServiceName, ServiceRecord};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::ports::{AuditLogPort, MutationOutcome, ServiceControlPort};
use crate::services::{NameLocks, ServiceCache};

/// Stops and disables one service, then reconciles its cached record.
///
/// Steps run in a fixed order: validate the name, resolve the cached
/// record, take the per-name lock, append the audit line, call the OS,
/// reconcile. The OS is never called unless the audit line was written.
pub struct DisableServiceUseCase {
    control: Arc<dyn ServiceControlPort>,
    audit_log: Arc<dyn AuditLogPort>,
    cache: Arc<ServiceCache>,
    locks: Arc<NameLocks>,
}

impl DisableServiceUseCase {
    pub fn new(
        control: Arc<dyn ServiceControlPort>,
        audit_log: Arc<dyn AuditLogPort>,
        cache: Arc<ServiceCache>,
        locks: Arc<NameLocks>,
    ) -> Self {
        Self {
            control,
            audit_log,
            cache,
            locks,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, service_name: &str) -> Result<ServiceRecord, DomainError> {
        let name = ServiceName::parse(service_name)?;

        if self.cache.find(name.as_str()).await?.is_none() {
            return Err(DomainError::ServiceNotFound(name.to_string()));
        }

        let _guard = self.locks.lock(name.as_str()).await;

        self.audit_log
            .append(&AuditLogEntry::new(name.as_str()))
            .await
            .inspect_err(|e| error!(service = %name, error = %e, "Failed to write audit log"))?;

        let outcome = self
            .control
            .disable(&name)
            .await
            .inspect_err(|e| error!(service = %name, error = %e, "Failed to disable service"))?;

        let reconciled = match outcome {
            MutationOutcome::Updated(entry) => {
                let record = self
                    .cache
                    .update_record(name.as_str(), |r| r.apply_entry(&entry))
                    .await;
                info!(
                    service = %name,
                    state = %entry.state,
                    startup_type = %entry.startup_type,
                    "Service disabled"
                );
                record
            }
            MutationOutcome::Rejected(message) => {
                warn!(service = %name, message = %message, "Service manager rejected disable");
                self.cache
                    .update_record(name.as_str(), |r| r.info.mark_error(message))
                    .await
            }
        };

        reconciled.ok_or_else(|| DomainError::ServiceNotFound(name.to_string()))
    }
}
