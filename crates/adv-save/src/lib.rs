//! Save/load for the adventure engine.
//!
//! [`codec`] turns the mutable part of a [`World`](adv_core::World) into a
//! versioned flat-text document and back; [`SaveStore`] maps named slots to
//! files in a save directory.

pub mod codec;
pub mod config;
pub mod error;
pub mod slot;
pub mod store;

pub use codec::{CURRENT_VERSION, MIN_VERSION, SaveSnapshot, apply, decode, encode, restore};
pub use config::SaveConfig;
pub use error::{SaveError, SaveResult};
pub use slot::{SlotName, is_safe_slot_name};
pub use store::{SaveStore, SlotInfo};
