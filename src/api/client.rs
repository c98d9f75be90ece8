//! PokeAPI Client
//!
//! Typed PokeAPI requests that consult the response cache before hitting the
//! network. Bodies are cached under their full request URL.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{Fetch, HttpFetcher};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Caching PokeAPI client.
#[derive(Debug)]
pub struct PokeApiClient<F = HttpFetcher> {
    fetcher: F,
    cache: TtlCache,
    base_url: String,
}

impl PokeApiClient<HttpFetcher> {
    /// Creates a client over HTTP with the configured cache interval,
    /// base URL and request timeout.
    ///
    /// Must be called inside a Tokio runtime, which drives the cache reaper.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout())?;
        let cache = TtlCache::new(config.cache_ttl())?;
        Ok(Self::new(fetcher, cache, config.base_url.clone()))
    }
}

impl<F: Fetch> PokeApiClient<F> {
    pub fn new(fetcher: F, cache: TtlCache, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            fetcher,
            cache,
            base_url,
        }
    }

    /// URL of the first page of location areas.
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    // == Location Areas ==
    /// Fetches one page of location areas.
    ///
    /// `url` is either `location_areas_url()` or a `next`/`previous` link
    /// from a previous page.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.get_json(url).await
    }

    // == Location Area ==
    /// Fetches a single location area by name.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.get_json(&url).await.map_err(|err| match err {
            err if err.is_not_found() => PokedexError::UnknownLocation(name.to_string()),
            err => err,
        })
    }

    // == Pokemon ==
    /// Fetches a Pokemon by name (case-insensitive).
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name.to_lowercase());
        self.get_json(&url).await.map_err(|err| match err {
            err if err.is_not_found() => PokedexError::UnknownPokemon(name.to_string()),
            err => err,
        })
    }

    /// The response cache backing this client.
    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    /// Stops the cache reaper.
    pub async fn close(self) {
        self.cache.close().await;
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_cached(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // == Cached Fetch ==
    /// Returns the cached body for `url`, fetching and caching it on a miss.
    ///
    /// Failed fetches are not cached.
    async fn get_cached(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }

        debug!(url, "Cache miss, fetching from API");
        let body = self.fetcher.fetch(url).await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }
}
