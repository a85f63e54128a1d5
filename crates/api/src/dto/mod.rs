pub mod service;

pub use service::{HealthResponse, RefreshResponse, ServiceRecordResponse};
