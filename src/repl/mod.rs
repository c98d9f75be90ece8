//! REPL Module
//!
//! Line-oriented command loop state: input tokenizing, the command table,
//! the caught-Pokemon table and the session that dispatches commands.

mod commands;
mod input;
mod pokedex;
mod session;

pub use commands::{catch_chance, is_caught, Command};
pub use input::clean_input;
pub use pokedex::Pokedex;
pub use session::{Outcome, Session};

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";
