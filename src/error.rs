//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the cache, the API client and the REPL commands.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// The cache interval cannot drive a periodic timer
    #[error("Invalid cache interval: {0:?}")]
    InvalidInterval(Duration),

    /// The reaper task needs a Tokio runtime to be spawned on
    #[error("No Tokio runtime available to run the cache reaper")]
    RuntimeUnavailable,

    /// Transport-level failure talking to the API
    #[error("error fetching data: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed with status code: {status}")]
    Status { url: String, status: u16 },

    /// The response body was not the JSON we expected
    #[error("error parsing JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A command was invoked without its required argument
    #[error("{0}")]
    MissingArgument(&'static str),

    /// Named Pokemon does not exist upstream
    #[error("pokemon {0} not found")]
    UnknownPokemon(String),

    /// Named location area does not exist upstream
    #[error("location area {0} not found")]
    UnknownLocation(String),

    /// The Pokeball was thrown but the target could not be fetched
    #[error("Throwing a Pokeball at {name}...\n{source}")]
    CatchFailed {
        name: String,
        #[source]
        source: Box<PokedexError>,
    },
}

impl PokedexError {
    /// Returns true if this error is an HTTP 404 from the API.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::Status { status: 404, .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
