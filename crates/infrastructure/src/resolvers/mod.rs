pub mod ai;
pub mod web_scrape;

pub use ai::AiResolver;
pub use web_scrape::WebScrapeResolver;
