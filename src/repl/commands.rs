//! Command table
//!
//! Names, help text and the catch roll rule.

/// Every command the REPL understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// All commands, in help order.
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    /// Looks up a command by the word typed at the prompt.
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == word)
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Displays a help message",
            Command::Exit => "Exit the Pokedex",
            Command::Map => "Displays the next 20 location areas in the Pokemon world",
            Command::MapBack => "Displays the previous 20 location areas in the Pokemon world",
            Command::Explore => "Lists Pokemon found at a location",
            Command::Catch => "Catch a Pokemon",
            Command::Inspect => "Inspect a Pokemon",
            Command::Pokedex => "Lists Pokemon you have caught",
        }
    }
}

// == Catch Rule ==
/// Percent chance of a catch; goes negative for very experienced Pokemon.
pub fn catch_chance(base_experience: u32) -> i64 {
    100 - i64::from(base_experience) / 2
}

/// Whether a roll in `0..100` catches a Pokemon with `base_experience`.
pub fn is_caught(base_experience: u32, roll: u32) -> bool {
    i64::from(roll) <= catch_chance(base_experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.name()), Some(command));
        }
        assert_eq!(Command::parse("mapb"), Some(Command::MapBack));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(Command::parse("fly"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_catch_chance() {
        assert_eq!(catch_chance(0), 100);
        assert_eq!(catch_chance(112), 44);
        assert_eq!(catch_chance(340), -70);
    }

    #[test]
    fn test_is_caught_bounds() {
        // Zero experience: every roll in 0..100 succeeds.
        assert!((0..100).all(|roll| is_caught(0, roll)));
        // Chance below zero: nothing succeeds.
        assert!((0..100).all(|roll| !is_caught(250, roll)));
        assert!(is_caught(112, 44));
        assert!(!is_caught(112, 45));
    }
}
