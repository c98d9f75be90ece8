//! REPL session
//!
//! Owns the API client, the pagination cursors and the Pokedex, and turns
//! one line of input into the text to print.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::api::{Fetch, HttpFetcher, PokeApiClient};
use crate::error::{PokedexError, Result};
use crate::models::Pokemon;
use crate::repl::{clean_input, is_caught, Command, Pokedex};

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (if any) and prompt again
    Continue(String),
    /// Print the text and stop reading input
    Exit(String),
}

/// State carried between commands.
#[derive(Debug)]
pub struct Session<F = HttpFetcher> {
    client: PokeApiClient<F>,
    next: Option<String>,
    previous: Option<String>,
    pokedex: Pokedex,
    rng: StdRng,
}

impl<F: Fetch> Session<F> {
    /// Starts a session positioned before the first page of location areas.
    pub fn new(client: PokeApiClient<F>) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Same as `new` with a caller-provided generator for catch rolls.
    pub fn with_rng(client: PokeApiClient<F>, rng: StdRng) -> Self {
        let next = Some(client.location_areas_url());
        Self {
            client,
            next,
            previous: None,
            pokedex: Pokedex::new(),
            rng,
        }
    }

    // == Execute ==
    /// Runs one line of input.
    ///
    /// Blank lines produce empty output; unknown commands are reported in
    /// the output rather than as errors.
    pub async fn execute(&mut self, line: &str) -> Result<Outcome> {
        let words = clean_input(line);
        let Some(first) = words.first() else {
            return Ok(Outcome::Continue(String::new()));
        };
        let Some(command) = Command::parse(first) else {
            return Ok(Outcome::Continue("Unknown command".to_string()));
        };
        let argument = words.get(1).map(String::as_str);
        debug!(command = command.name(), ?argument, "Dispatching command");

        let output = match command {
            Command::Exit => return Ok(Outcome::Exit("Closing the Pokedex... Goodbye!".to_string())),
            Command::Help => help(),
            Command::Map => self.map().await?,
            Command::MapBack => self.map_back().await?,
            Command::Explore => {
                let area = argument.ok_or(PokedexError::MissingArgument("missing location area name"))?;
                self.explore(area).await?
            }
            Command::Catch => {
                let name = argument.ok_or(PokedexError::MissingArgument("you must provide a pokemon name"))?;
                self.catch(name).await?
            }
            Command::Inspect => {
                let name = argument.ok_or(PokedexError::MissingArgument("you must provide a pokemon name"))?;
                self.inspect(name)
            }
            Command::Pokedex => self.list_pokedex(),
        };

        Ok(Outcome::Continue(output))
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    pub fn client(&self) -> &PokeApiClient<F> {
        &self.client
    }

    /// Ends the session and stops the cache reaper.
    pub async fn close(self) {
        self.client.close().await;
    }

    async fn map(&mut self) -> Result<String> {
        match self.next.clone() {
            Some(url) => self.show_page(&url).await,
            None => Ok("You're already on the last page.".to_string()),
        }
    }

    async fn map_back(&mut self) -> Result<String> {
        match self.previous.clone() {
            Some(url) => self.show_page(&url).await,
            None => Ok("You're on the first page.".to_string()),
        }
    }

    async fn show_page(&mut self, url: &str) -> Result<String> {
        let page = self.client.location_areas(url).await?;
        self.next = page.next;
        self.previous = page.previous;

        let mut lines = vec!["Location Areas:".to_string()];
        lines.extend(page.results.into_iter().map(|area| area.name));
        Ok(lines.join("\n"))
    }

    async fn explore(&self, area: &str) -> Result<String> {
        let location = self.client.location_area(area).await?;

        let mut lines = vec!["Found Pokemon:".to_string()];
        lines.extend(
            location
                .pokemon_encounters
                .iter()
                .map(|encounter| format!(" - {}", encounter.pokemon.name)),
        );
        Ok(lines.join("\n"))
    }

    // The throw line comes before the lookup, so a failed lookup still
    // reports it ahead of the error.
    async fn catch(&mut self, name: &str) -> Result<String> {
        let mut lines = vec![format!("Throwing a Pokeball at {}...", name)];
        let pokemon = self
            .client
            .pokemon(name)
            .await
            .map_err(|err| PokedexError::CatchFailed {
                name: name.to_string(),
                source: Box::new(err),
            })?;
        let roll = self.rng.gen_range(0..100);
        let base_experience = pokemon.base_experience.unwrap_or(0);

        if is_caught(base_experience, roll) {
            debug!(pokemon = %pokemon.name, roll, base_experience, "Caught");
            self.pokedex.insert(pokemon);
            lines.push(format!("{} was caught!", name));
            lines.push("You may now inspect it with the inspect command.".to_string());
        } else {
            lines.push(format!("{} escaped!", name));
        }
        Ok(lines.join("\n"))
    }

    fn inspect(&self, name: &str) -> String {
        match self.pokedex.get(name) {
            Some(pokemon) => describe(pokemon),
            None => "you have not caught that pokemon".to_string(),
        }
    }

    fn list_pokedex(&self) -> String {
        let mut lines = vec!["Your Pokedex:".to_string()];
        lines.extend(self.pokedex.names().map(|name| format!(" - {}", name)));
        lines.join("\n")
    }
}

fn help() -> String {
    let mut lines = vec!["Welcome to the Pokedex!".to_string(), "Usage:".to_string()];
    lines.extend(
        Command::ALL
            .iter()
            .map(|command| format!("{}: {}", command.name(), command.description())),
    );
    lines.join("\n")
}

fn describe(pokemon: &Pokemon) -> String {
    let mut lines = vec![
        format!("Name: {}", pokemon.name),
        format!("Height: {}", pokemon.height),
        format!("Weight: {}", pokemon.weight),
        "Stats:".to_string(),
    ];
    lines.extend(
        pokemon
            .stats
            .iter()
            .map(|stat| format!("  -{}: {}", stat.stat.name, stat.base_stat)),
    );
    lines.push("Types:".to_string());
    lines.extend(pokemon.types.iter().map(|t| format!("  - {}", t.kind.name)));
    lines.join("\n")
}
