mod name_locks;
mod service_cache;

pub use name_locks::{NameLockGuard, NameLocks};
pub use service_cache::{CacheSnapshot, ServiceCache, DEFAULT_CACHE_TTL};
