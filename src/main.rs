//! Pokedex - A command-line client for PokeAPI
//!
//! Reads commands from stdin and prints results to stdout. Logs go to
//! stderr and are silent below `warn` unless `RUST_LOG` says otherwise.

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::{Outcome, PROMPT};
use pokedex::{Config, PokeApiClient, Session};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the API client, which starts the cache reaper
/// 4. Show the first page of location areas
/// 5. Read commands until `exit`, end of input or Ctrl+C
/// 6. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={}s, base_url={}, request_timeout={}s",
        config.cache_interval, config.base_url, config.request_timeout
    );

    let client = PokeApiClient::from_config(&config).context("failed to start the API client")?;
    let mut session = Session::new(client);

    run_line(&mut session, "map").await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                None
            }
        };
        let Some(line) = line else {
            println!();
            break;
        };

        if run_line(&mut session, &line).await {
            break;
        }
    }

    let stats = session.client().cache().stats();
    debug!(
        "Cache statistics: hits={}, misses={}, hit_rate={:.1}%, expired={}, sweeps={}, entries={}",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0,
        stats.expired,
        stats.sweeps,
        stats.total_entries
    );

    session.close().await;
    Ok(())
}

/// Runs one line and prints its output. Returns true when the REPL should stop.
async fn run_line(session: &mut Session, line: &str) -> bool {
    match session.execute(line).await {
        Ok(Outcome::Continue(output)) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            false
        }
        Ok(Outcome::Exit(output)) => {
            println!("{}", output);
            true
        }
        Err(err) => {
            debug!(error = %err, line, "Command failed");
            println!("{}", err);
            false
        }
    }
}
