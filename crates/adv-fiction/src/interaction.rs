//! State transitions driven by player actions.
//!
//! These functions are the only place game rules mutate a [`World`]: moving
//! through (and unlocking) exits, moving items between a room and the
//! inventory, and using items.

use adv_core::{Direction, Item, ItemId, ItemLocation, RoomId, World};

use crate::parser::{Scope, find_item};

/// Result of trying to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player is now in `room`. `unlocked` is set when this move opened
    /// a locked exit.
    Moved {
        /// The room entered.
        room: RoomId,
        /// Whether this move unlocked the exit.
        unlocked: bool,
    },
    /// No exit in that direction.
    NoExit,
    /// The exit is locked and the player lacks the key.
    Locked {
        /// Id of the required item.
        key: String,
    },
}

/// Result of trying to take an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeOutcome {
    /// The item is now carried.
    Taken,
    /// The item is not in the current room.
    NotHere,
    /// The item cannot be picked up.
    NotTakeable,
    /// No free inventory slot.
    InventoryFull,
}

/// Result of trying to drop an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item is now in the current room.
    Dropped,
    /// The player does not carry the item.
    NotCarried,
    /// The current room has no space left.
    RoomFull,
}

/// Result of trying to use an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    /// The player carries nothing by that name.
    NotFound,
    /// The item has no use.
    NotUsable,
    /// The item was used.
    Used {
        /// Text to show the player.
        message: String,
        /// Whether the item was used up.
        consumed: bool,
    },
}

/// Move the player through the exit in `dir`.
///
/// A locked exit opens if the player carries its key and stays open for
/// good, whatever happens to the key afterwards.
pub fn move_player(world: &mut World, dir: Direction) -> MoveOutcome {
    let from = world.current_room_id();
    let Some(exit) = world.current_room().map(|room| room.exit(dir).clone()) else {
        return MoveOutcome::NoExit;
    };
    let Some(target) = exit.target else {
        return MoveOutcome::NoExit;
    };

    let mut unlocked = false;
    if exit.is_locked() {
        let key = exit.key.unwrap_or_default();
        if !world.has_item(&key) {
            tracing::debug!(from = from.index(), direction = %dir, key = %key, "exit locked");
            return MoveOutcome::Locked { key };
        }
        if let Some(room) = world.current_room_mut() {
            room.exit_mut(dir).unlocked = true;
        }
        unlocked = true;
    }

    if world.set_current_room(target).is_err() {
        return MoveOutcome::NoExit;
    }
    if let Some(room) = world.current_room_mut() {
        room.visited = true;
    }
    tracing::debug!(
        from = from.index(),
        to = target.index(),
        direction = %dir,
        unlocked,
        "player moved"
    );
    MoveOutcome::Moved {
        room: target,
        unlocked,
    }
}

/// Move an item from the current room into the inventory.
pub fn take_item(world: &mut World, item: ItemId) -> TakeOutcome {
    let here = world.current_room_id();
    if world.location_of(item) != Some(ItemLocation::Room(here)) {
        return TakeOutcome::NotHere;
    }
    if !world.item(item).is_some_and(|i| i.takeable) {
        return TakeOutcome::NotTakeable;
    }
    match world.put_in_inventory(item) {
        Ok(()) => TakeOutcome::Taken,
        Err(_) => TakeOutcome::InventoryFull,
    }
}

/// Move a carried item into the current room.
pub fn drop_item(world: &mut World, item: ItemId) -> DropOutcome {
    if world.location_of(item) != Some(ItemLocation::Inventory) {
        return DropOutcome::NotCarried;
    }
    let here = world.current_room_id();
    match world.place_item(item, here) {
        Ok(()) => DropOutcome::Dropped,
        Err(_) => DropOutcome::RoomFull,
    }
}

/// Take the item the player named. Returns whether it moved.
pub fn take(world: &mut World, query: &str) -> bool {
    find_item(world, query, Scope::Room)
        .is_some_and(|item| take_item(world, item) == TakeOutcome::Taken)
}

/// Drop the item the player named. Returns whether it moved.
pub fn drop(world: &mut World, query: &str) -> bool {
    find_item(world, query, Scope::Inventory)
        .is_some_and(|item| drop_item(world, item) == DropOutcome::Dropped)
}

/// Use a carried item.
///
/// Marks it used for good. A consumable item leaves the game.
pub fn use_item(world: &mut World, query: &str) -> UseOutcome {
    let Some(id) = find_item(world, query, Scope::Inventory) else {
        return UseOutcome::NotFound;
    };
    let Some(item) = world.item_mut(id) else {
        return UseOutcome::NotFound;
    };
    let Some(message) = item.use_message.clone() else {
        return UseOutcome::NotUsable;
    };

    item.used = true;
    let consumed = item.use_consumable;
    if consumed {
        world.detach_item(id);
    }
    tracing::debug!(item = id.index(), consumed, "item used");
    UseOutcome::Used { message, consumed }
}

/// Find an item the player can see: carried first, then in the room.
pub fn examine<'w>(world: &'w World, query: &str) -> Option<&'w Item> {
    find_item(world, query, Scope::Both).and_then(|id| world.item(id))
}
