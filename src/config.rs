//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI endpoint
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Response cache expiry and sweep interval in seconds
    pub cache_interval: u64,
    /// PokeAPI base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL` - Cache TTL in seconds (default: 300)
    /// - `POKEAPI_BASE_URL` - API base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_REQUEST_TIMEOUT` - Request timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_interval),
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout: env::var("POKEDEX_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Cache interval as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// Request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 300,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_interval, 300);
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    // Single test touches the environment so parallel tests don't race on it.
    #[test]
    fn test_config_from_env() {
        env::remove_var("POKEDEX_CACHE_INTERVAL");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_REQUEST_TIMEOUT");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, 300);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, 10);

        env::set_var("POKEDEX_CACHE_INTERVAL", "60");
        env::set_var("POKEAPI_BASE_URL", "http://localhost:8080/api/v2/");
        env::set_var("POKEDEX_REQUEST_TIMEOUT", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.cache_interval, 60);
        assert_eq!(config.base_url, "http://localhost:8080/api/v2");
        assert_eq!(config.request_timeout, 10);

        env::remove_var("POKEDEX_CACHE_INTERVAL");
        env::remove_var("POKEAPI_BASE_URL");
        env::remove_var("POKEDEX_REQUEST_TIMEOUT");
    }
}
