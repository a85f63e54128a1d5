use servicedex_application::ports::ServiceInfoResolver;
use servicedex_domain::{Config, DomainError};
use servicedex_infrastructure::http::RetryingFetcher;
use servicedex_infrastructure::repositories::{FileAuditLog, JsonServiceInfoRepository};
use servicedex_infrastructure::resolvers::{AiResolver, WebScrapeResolver};
use servicedex_infrastructure::system::PowerShellServiceControl;
use std::sync::Arc;
use tracing::info;

pub struct Adapters {
    pub service_control: Arc<PowerShellServiceControl>,
    pub info_repo: Arc<JsonServiceInfoRepository>,
    pub audit_log: Arc<FileAuditLog>,
    /// In priority order: the first resolver to find something wins.
    pub resolvers: Vec<Arc<dyn ServiceInfoResolver>>,
}

impl Adapters {
    pub async fn new(config: &Config) -> Result<Self, DomainError> {
        let info_repo = JsonServiceInfoRepository::load(&config.storage.metadata_path).await;

        let fetcher = Arc::new(RetryingFetcher::new(&config.scraper)?);
        let web_scrape: Arc<dyn ServiceInfoResolver> =
            Arc::new(WebScrapeResolver::new(fetcher, &config.scraper)?);

        let ai = AiResolver::new(&config.ai)?;
        if !ai.is_configured() {
            info!("No AI credential configured, AI lookups disabled");
        }
        let ai: Arc<dyn ServiceInfoResolver> = Arc::new(ai);

        Ok(Self {
            service_control: Arc::new(PowerShellServiceControl::new(&config.system)),
            info_repo: Arc::new(info_repo),
            audit_log: Arc::new(FileAuditLog::new(&config.storage.audit_log_path)),
            resolvers: vec![web_scrape, ai],
        })
    }
}
