#[derive(Debug, Clone)]
pub struct Config {
    pub ergast_api_base: String,
    pub cache_expiry_secs: i64,
    pub request_timeout_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn init() -> Self {
        Config {
            ergast_api_base: std::env::var("ERGAST_API_BASE")
                .unwrap_or_else(|_| "https://api.jolpi.ca/ergast/f1".to_string()),
            cache_expiry_secs: std::env::var("CACHE_EXPIRY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }
}
