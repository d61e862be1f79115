use reqwest::Client;

use crate::models::cache::ResponseCache;
use crate::utils::config::Config;

pub struct AppState {
    pub config: Config,
    pub http_client: Client,
    pub cache: ResponseCache,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cache = ResponseCache::new(config.cache_expiry_secs);
        Self {
            config,
            http_client: Client::new(),
            cache,
        }
    }
}
