pub mod ai;
pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;
pub mod scraper;
pub mod server;
pub mod storage;
pub mod system;

pub use ai::AiConfig;
pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use scraper::ScraperConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use system::SystemConfig;
