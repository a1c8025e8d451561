use crate::cache::Cache;
use crate::db::Repository;
use crate::jobs::JobSender;

/// Application state shared across all HTTP handlers.
///
/// This struct is wrapped in `Arc` and shared across all request handlers
/// via Axum's State extraction. It contains all the necessary dependencies
/// for handling HTTP requests.
#[derive(Clone)]
pub struct AppState {
    /// Database repository for link operations
    pub repository: Repository,

    /// Redis cache for redirect lookups
    pub cache: Cache,

    /// Background job sender for asynchronous tasks (click accounting)
    pub job_sender: JobSender,

    /// Base URL for constructing short and admin URLs (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Length of generated public keys
    pub key_length: usize,

    /// Length of generated secret keys
    pub secret_key_length: usize,

    /// Maximum number of attempts to generate a unique key
    pub generation_max_attempts: u32,

    /// Whether caching is enabled for redirect lookups
    pub cache_enabled: bool,
}
