pub mod retrying_fetcher;

pub use retrying_fetcher::RetryingFetcher;
