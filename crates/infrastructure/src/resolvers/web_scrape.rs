//! Metadata lookup against a public service catalogue site.
//!
//! Two requests per lookup: a search listing, then the detail page of the
//! first card whose text names the service exactly. HTML parsing stays in
//! synchronous helpers because `scraper::Html` is not `Send`.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use servicedex_application::ports::{Resolution, ServiceInfoResolver};
use servicedex_domain::config::ScraperConfig;
use servicedex_domain::{DomainError, InfoSource, ServiceInfo};
use std::sync::Arc;
use tracing::debug;

use crate::http::RetryingFetcher;

const CARD_SELECTOR: &str = ".fusion-post-grid";
const TITLE_LINK_SELECTOR: &str = ".fusion-post-title a";
const SERVICE_NAME_MARKER: &str = "Имя службы: ";

const DESCRIPTION_LABEL: &str = "Описание по умолчанию";
const EXPLAINED_LABEL: &str = "Нормальное описание";
const RECOMMENDATION_LABEL: &str = "Рекомендации";
const RECOMMENDATION_BOILERPLATE: &str = "Учитывая следующее:";

pub const FIELD_NOT_FOUND: &str = "Not found";

pub struct WebScrapeResolver {
    fetcher: Arc<RetryingFetcher>,
    search_url: reqwest::Url,
    detail_path_marker: String,
}

impl WebScrapeResolver {
    pub fn new(fetcher: Arc<RetryingFetcher>, config: &ScraperConfig) -> Result<Self, DomainError> {
        let search_url = reqwest::Url::parse(&config.search_url).map_err(|e| {
            DomainError::Transport(format!("Invalid search URL {}: {}", config.search_url, e))
        })?;

        Ok(Self {
            fetcher,
            search_url,
            detail_path_marker: config.detail_path_marker.clone(),
        })
    }

    fn search_url_for(&self, service_name: &str) -> String {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("s", service_name);
        url.into()
    }

    fn absolute_link(&self, href: &str) -> Result<String, DomainError> {
        self.search_url
            .join(href)
            .map(String::from)
            .map_err(|e| DomainError::Parse(format!("Invalid detail link {}: {}", href, e)))
    }
}

#[async_trait]
impl ServiceInfoResolver for WebScrapeResolver {
    fn source(&self) -> InfoSource {
        InfoSource::Scraped
    }

    async fn resolve(&self, service_name: &str) -> Result<Resolution, DomainError> {
        let listing = self
            .fetcher
            .fetch_text(&self.search_url_for(service_name))
            .await?;

        let Some(href) = find_detail_link(&listing, service_name, &self.detail_path_marker)? else {
            debug!(service = %service_name, "No matching catalogue entry");
            return Ok(Resolution::NotFound);
        };

        let detail_url = self.absolute_link(&href)?;
        debug!(service = %service_name, url = %detail_url, "Fetching catalogue detail page");

        let page = self.fetcher.fetch_text(&detail_url).await?;
        let info = extract_detail(&page)?.with_url(detail_url);

        Ok(Resolution::Found(info))
    }
}

fn selector(css: &str) -> Result<Selector, DomainError> {
    Selector::parse(css).map_err(|e| DomainError::Parse(format!("Bad selector {}: {}", css, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn or_not_found(text: Option<String>) -> String {
    text.filter(|t| !t.is_empty())
        .unwrap_or_else(|| FIELD_NOT_FOUND.to_string())
}

/// Returns the detail link of the first listing card that names
/// `service_name`, if that link points into the catalogue.
pub fn find_detail_link(
    html: &str,
    service_name: &str,
    detail_path_marker: &str,
) -> Result<Option<String>, DomainError> {
    let document = Html::parse_document(html);
    let cards = selector(CARD_SELECTOR)?;
    let title_link = selector(TITLE_LINK_SELECTOR)?;
    let marker = format!("{}{}", SERVICE_NAME_MARKER, service_name);

    let href = document
        .select(&cards)
        .find(|card| card.text().collect::<String>().contains(&marker))
        .and_then(|card| card.select(&title_link).next())
        .and_then(|link| link.value().attr("href"))
        .filter(|href| href.contains(detail_path_marker))
        .map(str::to_string);

    Ok(href)
}

/// Pulls the three labelled fields out of a catalogue detail page. Missing
/// fields come back as [`FIELD_NOT_FOUND`].
pub fn extract_detail(html: &str) -> Result<ServiceInfo, DomainError> {
    let document = Html::parse_document(html);
    let paragraphs = selector("p")?;

    let labelled = |label: &str| {
        document
            .select(&paragraphs)
            .find(|p| p.text().collect::<String>().contains(label))
    };

    let description = labelled(DESCRIPTION_LABEL).and_then(next_paragraph_text);
    let explained = labelled(EXPLAINED_LABEL).and_then(next_paragraph_text);
    let recommendation = labelled(RECOMMENDATION_LABEL).map(following_text);

    Ok(ServiceInfo::new(
        or_not_found(description),
        or_not_found(explained),
        or_not_found(recommendation),
        InfoSource::Scraped,
    ))
}

fn next_paragraph_text(label: ElementRef<'_>) -> Option<String> {
    label
        .next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "p")
        .map(element_text)
}

fn following_text(label: ElementRef<'_>) -> String {
    let joined = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    joined
        .strip_prefix(RECOMMENDATION_BOILERPLATE)
        .unwrap_or(&joined)
        .trim()
        .to_string()
}
