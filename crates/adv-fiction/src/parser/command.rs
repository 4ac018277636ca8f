//! Command parsing for player input.

use adv_core::Direction;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Describe the current room.
    Look,
    /// Move in a direction.
    Move {
        /// The direction to move.
        direction: Direction,
    },
    /// `go` with a missing or unrecognised direction.
    Go {
        /// What followed the verb, if anything.
        target: Option<String>,
    },
    /// Take an item from the room.
    Take {
        /// The item name.
        item: Option<String>,
    },
    /// Drop a carried item.
    Drop {
        /// The item name.
        item: Option<String>,
    },
    /// Use a carried item.
    Use {
        /// The item name.
        item: Option<String>,
    },
    /// Examine an item.
    Examine {
        /// The item name.
        item: Option<String>,
    },
    /// List inventory.
    Inventory,
    /// Save to a slot.
    Save {
        /// Slot name.
        slot: Option<String>,
    },
    /// Load from a slot.
    Load {
        /// Slot name.
        slot: Option<String>,
    },
    /// List save slots.
    Saves,
    /// Start the world over from its loaded state.
    Restart,
    /// Show help.
    Help,
    /// Quit the game.
    Quit,
    /// Unknown command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// Verb synonyms for command parsing.
const LOOK_VERBS: &[&str] = &["look", "l"];
const MOVE_VERBS: &[&str] = &["go", "move"];
const TAKE_VERBS: &[&str] = &["take", "get"];
const DROP_VERBS: &[&str] = &["drop", "put"];
const USE_VERBS: &[&str] = &["use"];
const EXAMINE_VERBS: &[&str] = &["examine", "x", "inspect"];
const INVENTORY_VERBS: &[&str] = &["inventory", "i"];
const HELP_VERBS: &[&str] = &["help", "?"];
const QUIT_VERBS: &[&str] = &["quit", "exit"];

impl Command {
    /// Parse a line of player input.
    ///
    /// The first word is the verb and the trimmed remainder is the noun.
    /// The verb and item nouns are lowercased; save slot names keep their
    /// case so they match the names given on the command line. Returns
    /// `None` for a blank line.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb.to_lowercase(), Some(rest.trim())),
            None => (input.to_lowercase(), None),
        };
        let rest = rest.filter(|r| !r.is_empty());
        let noun = rest.map(str::to_lowercase);
        let slot = rest.map(str::to_string);
        let verb = verb.as_str();
        let is = |verbs: &[&str]| verbs.contains(&verb);

        let command = if let Some(direction) = Direction::parse(verb) {
            Self::Move { direction }
        } else if is(LOOK_VERBS) {
            parse_look(noun)
        } else if is(MOVE_VERBS) {
            parse_go(noun)
        } else if is(TAKE_VERBS) {
            Self::Take { item: noun }
        } else if is(DROP_VERBS) {
            Self::Drop { item: noun }
        } else if is(USE_VERBS) {
            Self::Use { item: noun }
        } else if is(EXAMINE_VERBS) {
            Self::Examine { item: noun }
        } else if is(INVENTORY_VERBS) {
            Self::Inventory
        } else if verb == "save" {
            Self::Save { slot }
        } else if verb == "load" {
            Self::Load { slot }
        } else if verb == "saves" {
            Self::Saves
        } else if verb == "restart" {
            Self::Restart
        } else if is(HELP_VERBS) {
            Self::Help
        } else if is(QUIT_VERBS) {
            Self::Quit
        } else {
            Self::Unknown {
                input: input.to_lowercase(),
            }
        };
        Some(command)
    }
}

fn parse_look(noun: Option<String>) -> Command {
    let Some(noun) = noun else {
        return Command::Look;
    };
    // "look at lamp" and "look lamp" both examine.
    let target = match noun.strip_prefix("at") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => noun.as_str(),
    };
    if target.is_empty() {
        Command::Look
    } else {
        Command::Examine {
            item: Some(target.to_string()),
        }
    }
}

fn parse_go(noun: Option<String>) -> Command {
    match noun.as_deref().and_then(Direction::parse) {
        Some(direction) => Command::Move { direction },
        None => Command::Go { target: noun },
    }
}
