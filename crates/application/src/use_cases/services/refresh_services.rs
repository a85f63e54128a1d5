use chrono::{DateTime, Utc};
use servicedex_domain::DomainError;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::services::ServiceCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub count: usize,
    pub refreshed_at: DateTime<Utc>,
}

pub struct RefreshServicesUseCase {
    cache: Arc<ServiceCache>,
}

impl RefreshServicesUseCase {
    pub fn new(cache: Arc<ServiceCache>) -> Self {
        Self { cache }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<RefreshOutcome, DomainError> {
        match self.cache.refresh().await {
            Ok(records) => {
                info!(count = records.len(), "Services cache refreshed");
                Ok(RefreshOutcome {
                    count: records.len(),
                    refreshed_at: Utc::now(),
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to refresh services cache");
                Err(e)
            }
        }
    }
}
