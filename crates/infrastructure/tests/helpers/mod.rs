#![allow(dead_code)]

use axum::Router;
use servicedex_domain::config::{AiConfig, ScraperConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port for the life of the test.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

pub fn scraper_config(addr: SocketAddr) -> ScraperConfig {
    ScraperConfig {
        search_url: format!("http://{}/", addr),
        max_retries: 2,
        retry_delay_ms: 10,
        request_timeout_secs: 5,
        ..ScraperConfig::default()
    }
}

pub fn ai_config(addr: SocketAddr, api_key: Option<&str>) -> AiConfig {
    AiConfig {
        endpoint: format!("http://{}/v1/chat/completions", addr),
        api_key: api_key.map(str::to_string),
        timeout_secs: 1,
        ..AiConfig::default()
    }
}
