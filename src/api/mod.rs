//! API Module
//!
//! HTTP fetch layer and the caching PokeAPI client.
//!
//! # Endpoints
//! - `GET /location-area/` - Paginated location area listing
//! - `GET /location-area/{name}` - Pokemon encounters in one area
//! - `GET /pokemon/{name}` - Pokemon details

pub mod client;
pub mod fetch;

pub use client::PokeApiClient;
pub use fetch::{Fetch, HttpFetcher};
