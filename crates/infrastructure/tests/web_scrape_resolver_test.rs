use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use servicedex_application::ports::{Resolution, ServiceInfoResolver};
use servicedex_domain::{DomainError, InfoSource};
use servicedex_infrastructure::http::RetryingFetcher;
use servicedex_infrastructure::resolvers::web_scrape::FIELD_NOT_FOUND;
use servicedex_infrastructure::resolvers::WebScrapeResolver;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

mod helpers;
use helpers::{scraper_config, spawn_server};

#[derive(Default)]
struct Catalogue {
    searches: Mutex<Vec<String>>,
}

const SPOOLER_DETAIL: &str = r#"<html><body>
    <h1>Spooler</h1>
    <p><b>Описание по умолчанию</b></p>
    <p>Loads files to memory for later printing</p>
    <p><b>Нормальное описание</b></p>
    <p>Manages all print jobs</p>
    <p><b>Рекомендации</b></p>
    <p>Учитывая следующее:</p>
    <p>Disable only if there is no printer</p>
</body></html>"#;

const BITS_DETAIL: &str = r#"<html><body>
    <p>Описание по умолчанию</p>
    <p>Transfers files in the background</p>
</body></html>"#;

async fn search(
    State(catalogue): State<Arc<Catalogue>>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let term = params.get("s").cloned().unwrap_or_default();
    catalogue.searches.lock().unwrap().push(term);

    Html(
        r#"<html><body>
        <div class="fusion-post-grid">
            <h2 class="fusion-post-title"><a href="/twikinarium/services/spooler/">Диспетчер печати</a></h2>
            <p>Имя службы: Spooler</p>
        </div>
        <div class="fusion-post-grid">
            <h2 class="fusion-post-title"><a href="/twikinarium/services/bits/">BITS</a></h2>
            <p>Имя службы: BITS</p>
        </div>
        <div class="fusion-post-grid">
            <h2 class="fusion-post-title"><a href="/news/elsewhere/">Elsewhere</a></h2>
            <p>Имя службы: Elsewhere</p>
        </div>
        </body></html>"#
            .to_string(),
    )
}

async fn serve_catalogue() -> (SocketAddr, Arc<Catalogue>) {
    let catalogue = Arc::new(Catalogue::default());
    let router = Router::new()
        .route("/", get(search))
        .route(
            "/twikinarium/services/spooler/",
            get(|| async { Html(SPOOLER_DETAIL) }),
        )
        .route(
            "/twikinarium/services/bits/",
            get(|| async { Html(BITS_DETAIL) }),
        )
        .with_state(catalogue.clone());
    (spawn_server(router).await, catalogue)
}

fn resolver(addr: SocketAddr) -> WebScrapeResolver {
    let config = scraper_config(addr);
    let fetcher = Arc::new(RetryingFetcher::new(&config).unwrap());
    WebScrapeResolver::new(fetcher, &config).unwrap()
}

#[tokio::test]
async fn test_resolves_detail_page() {
    let (addr, catalogue) = serve_catalogue().await;

    let resolution = resolver(addr).resolve("Spooler").await.unwrap();

    let Resolution::Found(info) = resolution else {
        panic!("expected a match");
    };
    assert_eq!(info.description, "Loads files to memory for later printing");
    assert_eq!(info.explained, "Manages all print jobs");
    assert_eq!(info.recommendation, "Disable only if there is no printer");
    assert_eq!(info.source, InfoSource::Scraped);
    assert_eq!(
        info.url.as_deref(),
        Some(format!("http://{}/twikinarium/services/spooler/", addr).as_str())
    );
    assert_eq!(*catalogue.searches.lock().unwrap(), vec!["Spooler".to_string()]);
}

#[tokio::test]
async fn test_missing_fields_become_not_found() {
    let (addr, _catalogue) = serve_catalogue().await;

    let Resolution::Found(info) = resolver(addr).resolve("BITS").await.unwrap() else {
        panic!("expected a match");
    };

    assert_eq!(info.description, "Transfers files in the background");
    assert_eq!(info.explained, FIELD_NOT_FOUND);
    assert_eq!(info.recommendation, FIELD_NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let (addr, _catalogue) = serve_catalogue().await;

    let resolution = resolver(addr).resolve("NoSuchService").await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
}

#[tokio::test]
async fn test_link_outside_catalogue_is_not_found() {
    let (addr, _catalogue) = serve_catalogue().await;

    let resolution = resolver(addr).resolve("Elsewhere").await.unwrap();

    assert_eq!(resolution, Resolution::NotFound);
}

#[tokio::test]
async fn test_search_term_is_url_encoded() {
    let (addr, catalogue) = serve_catalogue().await;

    resolver(addr).resolve("Print & Fax (x64)").await.unwrap();

    assert_eq!(
        *catalogue.searches.lock().unwrap(),
        vec!["Print & Fax (x64)".to_string()]
    );
}

#[tokio::test]
async fn test_search_failure_is_an_error() {
    let router = Router::new().route(
        "/",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let addr = spawn_server(router).await;

    let result = resolver(addr).resolve("Spooler").await;

    assert!(matches!(result, Err(DomainError::Transport(_))));
}
