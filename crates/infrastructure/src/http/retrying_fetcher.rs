use servicedex_domain::config::ScraperConfig;
use servicedex_domain::DomainError;
use std::time::Duration;

/// HTTP GET with a bounded number of retries and a constant delay between
/// attempts.
///
/// A transport error and a non-success status are both retried. Passing
/// `max_retries = 0` makes exactly one attempt.
pub struct RetryingFetcher {
    client: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl RetryingFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DomainError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(
            client,
            config.max_retries,
            config.retry_delay(),
        ))
    }

    pub fn with_client(client: reqwest::Client, max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            client,
            max_retries,
            retry_delay,
        }
    }

    pub async fn fetch(
        &self,
        url: &str,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<reqwest::Response, DomainError> {
        let mut remaining = max_retries;
        loop {
            match self.attempt(url).await {
                Ok(response) => return Ok(response),
                Err(e) if remaining == 0 => return Err(e),
                Err(_) => {
                    remaining -= 1;
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    /// Fetches `url` with the configured retry policy and returns the body.
    pub async fn fetch_text(&self, url: &str) -> Result<String, DomainError> {
        self.fetch(url, self.max_retries, self.retry_delay)
            .await?
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("read error for {}: {}", url, e)))
    }

    async fn attempt(&self, url: &str) -> Result<reqwest::Response, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("fetch error for {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Transport(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        Ok(response)
    }
}
