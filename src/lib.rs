//! Pokedex - A command-line client for PokeAPI
//!
//! Wraps HTTP fetches in a time-bounded response cache whose entries are
//! swept by a background reaper task.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
mod tasks;

#[cfg(test)]
mod testing;

pub use api::PokeApiClient;
pub use cache::TtlCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
