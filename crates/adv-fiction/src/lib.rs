//! Play engine for the adventure engine.
//!
//! Turns player input into state changes on a loaded
//! [`World`](adv_core::World): command parsing with forgiving item lookup,
//! movement through locked and open exits, taking, dropping and using items,
//! conditional room descriptions, and save slots.

pub mod describe;
pub mod error;
pub mod interaction;
pub mod parser;
pub mod session;

pub use describe::{render_room, resolve_description, select_rule};
pub use error::{FictionError, FictionResult};
pub use interaction::{
    DropOutcome, MoveOutcome, TakeOutcome, UseOutcome, drop, drop_item, examine, move_player, take,
    take_item, use_item,
};
pub use parser::{Command, Scope, find_item, suggest_items};
pub use session::{FictionSession, Reply};
