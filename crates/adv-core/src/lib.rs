//! Core types for the adventure engine: rooms, items, exits, and the world model.
//!
//! This crate only stores state and guards its invariants (capacity limits,
//! unique ids, single ownership of items). It is independent of the world file
//! parser: you can construct a [`World`] programmatically, which is what most
//! tests in the workspace do.

/// Conditional room descriptions and their condition vocabulary.
pub mod condition;
/// The six movement directions.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Stable integer handles for rooms and items.
pub mod id;
/// Item definitions and per-item runtime flags.
pub mod item;
/// Capacity limits for rooms, items, and the inventory.
pub mod limits;
/// Rooms and their exits.
pub mod room;
/// The aggregate world model.
pub mod world;

pub use condition::{ConditionKind, ConditionalDescription};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use id::{ItemId, RoomId};
pub use item::Item;
pub use limits::Limits;
pub use room::{Exit, Room};
pub use world::{ItemLocation, World};
