use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// Optional directions/geocoding base URL override. When set, requests go
    /// through a proxy that expects bearer auth instead of the direct
    /// `access_token` query param.
    pub mapbox_base_url: Option<String>,
    pub geocode_cache_ttl: u64,
    pub geocode_cache_max_entries: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            geocode_cache_ttl: env::var("GEOCODE_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_GEOCODE_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid GEOCODE_CACHE_TTL")?,
            geocode_cache_max_entries: env::var("GEOCODE_CACHE_MAX_ENTRIES")
                .unwrap_or_else(|_| DEFAULT_GEOCODE_CACHE_MAX_ENTRIES.to_string())
                .parse()
                .map_err(|_| "Invalid GEOCODE_CACHE_MAX_ENTRIES")?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
