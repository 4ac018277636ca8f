//! Command parsing and item resolution.

mod command;
mod lookup;

pub use command::Command;
pub use lookup::{Scope, find_item, suggest_items};
