use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::id::{ItemId, RoomId};
use crate::item::Item;
use crate::limits::Limits;
use crate::room::Room;

/// Where an item currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemLocation {
    /// Lying in a room.
    Room(RoomId),
    /// Carried by the player.
    Inventory,
}

/// The aggregate game state: rooms, items, inventory, and player position.
///
/// An item is in at most one place at a time. Every method that moves an item
/// detaches it from its previous location first; an item that is nowhere has
/// been consumed.
#[derive(Debug, Clone, Serialize)]
pub struct World {
    /// Informational world name.
    pub name: String,
    #[serde(skip)]
    limits: Limits,
    rooms: Vec<Room>,
    items: Vec<Item>,
    inventory: Vec<ItemId>,
    current_room: RoomId,
    start_room: RoomId,

    // Indexes
    #[serde(skip)]
    room_index: HashMap<String, RoomId>,
    #[serde(skip)]
    item_index: HashMap<String, ItemId>,
}

impl World {
    /// Create an empty world with the default limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_limits(name, Limits::default())
    }

    /// Create an empty world with custom limits.
    pub fn with_limits(name: impl Into<String>, limits: Limits) -> Self {
        Self {
            name: name.into(),
            limits,
            rooms: Vec::new(),
            items: Vec::new(),
            inventory: Vec::new(),
            current_room: RoomId(0),
            start_room: RoomId(0),
            room_index: HashMap::new(),
            item_index: HashMap::new(),
        }
    }

    /// The capacity limits of this world.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    // -----------------------------------------------------------------------
    // Rooms and items
    // -----------------------------------------------------------------------

    /// Add a room. Returns its handle.
    pub fn add_room(&mut self, room: Room) -> CoreResult<RoomId> {
        if self.rooms.len() >= self.limits.max_rooms {
            return Err(CoreError::CapacityExceeded {
                what: "rooms",
                limit: self.limits.max_rooms,
            });
        }
        if self.room_index.contains_key(&room.id) {
            return Err(CoreError::DuplicateId {
                kind: "room",
                id: room.id.clone(),
            });
        }

        let id = RoomId(self.rooms.len());
        self.room_index.insert(room.id.clone(), id);
        self.rooms.push(room);
        Ok(id)
    }

    /// Add an item without placing it anywhere. Returns its handle.
    pub fn add_item(&mut self, item: Item) -> CoreResult<ItemId> {
        if self.items.len() >= self.limits.max_items {
            return Err(CoreError::CapacityExceeded {
                what: "items",
                limit: self.limits.max_items,
            });
        }
        if self.item_index.contains_key(&item.id) {
            return Err(CoreError::DuplicateId {
                kind: "item",
                id: item.id.clone(),
            });
        }

        let id = ItemId(self.items.len());
        self.item_index.insert(item.id.clone(), id);
        self.items.push(item);
        Ok(id)
    }

    /// Get a room by handle.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    /// Get a mutable room by handle.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.index())
    }

    /// Get an item by handle.
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    /// Get a mutable item by handle.
    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.index())
    }

    /// All rooms in definition order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All items in definition order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Mutable access to every room, for bulk flag updates.
    pub fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    /// Mutable access to every item, for bulk flag updates.
    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    /// Find a room handle by its id.
    pub fn find_room(&self, id: &str) -> Option<RoomId> {
        self.room_index.get(id).copied()
    }

    /// Find an item handle by its id.
    pub fn find_item(&self, id: &str) -> Option<ItemId> {
        self.item_index.get(id).copied()
    }

    /// Connect `from` to `to` through `dir`, replacing any previous target.
    pub fn connect(&mut self, from: RoomId, dir: Direction, to: RoomId) -> CoreResult<()> {
        self.check_room(to)?;
        let room = self.room_mut(from).ok_or(CoreError::UnknownRoom(from))?;
        room.exit_mut(dir).target = Some(to);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Player position
    // -----------------------------------------------------------------------

    /// Handle of the room the player is in.
    pub fn current_room_id(&self) -> RoomId {
        self.current_room
    }

    /// The room the player is in. `None` only for a world without rooms.
    pub fn current_room(&self) -> Option<&Room> {
        self.room(self.current_room)
    }

    /// Mutable access to the room the player is in.
    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        let id = self.current_room;
        self.room_mut(id)
    }

    /// Put the player in a room. Does not touch any visit flags.
    pub fn set_current_room(&mut self, id: RoomId) -> CoreResult<()> {
        self.check_room(id)?;
        self.current_room = id;
        Ok(())
    }

    /// The room a new game starts in.
    pub fn start_room(&self) -> RoomId {
        self.start_room
    }

    /// Set the starting room.
    pub fn set_start_room(&mut self, id: RoomId) -> CoreResult<()> {
        self.check_room(id)?;
        self.start_room = id;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Item placement
    // -----------------------------------------------------------------------

    /// Items carried by the player, in pickup order.
    pub fn inventory(&self) -> &[ItemId] {
        &self.inventory
    }

    /// Whether the player carries the item with this id.
    pub fn has_item(&self, item_id: &str) -> bool {
        self.find_item(item_id)
            .is_some_and(|id| self.inventory.contains(&id))
    }

    /// Whether the room contains the item with this id.
    pub fn room_has_item(&self, room: RoomId, item_id: &str) -> bool {
        match (self.room(room), self.find_item(item_id)) {
            (Some(room), Some(item)) => room.contains(item),
            _ => false,
        }
    }

    /// Where the item currently is. `None` once consumed.
    pub fn location_of(&self, item: ItemId) -> Option<ItemLocation> {
        if self.inventory.contains(&item) {
            return Some(ItemLocation::Inventory);
        }
        self.rooms
            .iter()
            .position(|room| room.contains(item))
            .map(|idx| ItemLocation::Room(RoomId(idx)))
    }

    /// Move an item into a room.
    ///
    /// Fails without moving anything if the room is full.
    pub fn place_item(&mut self, item: ItemId, room: RoomId) -> CoreResult<()> {
        self.check_item(item)?;
        let limit = self.limits.max_room_items;
        let target = self.room(room).ok_or(CoreError::UnknownRoom(room))?;
        if target.contains(item) {
            return Ok(());
        }
        if target.items().len() >= limit {
            return Err(CoreError::CapacityExceeded {
                what: "items in one room",
                limit,
            });
        }

        self.detach_item(item);
        if let Some(target) = self.room_mut(room) {
            target.push_item(item);
        }
        Ok(())
    }

    /// Move an item into the player's inventory.
    ///
    /// Fails without moving anything if the inventory is full.
    pub fn put_in_inventory(&mut self, item: ItemId) -> CoreResult<()> {
        self.check_item(item)?;
        if self.inventory.contains(&item) {
            return Ok(());
        }
        if self.inventory.len() >= self.limits.max_inventory {
            return Err(CoreError::CapacityExceeded {
                what: "inventory slots",
                limit: self.limits.max_inventory,
            });
        }

        self.detach_item(item);
        self.inventory.push(item);
        Ok(())
    }

    /// Remove an item from wherever it is. Returns where it was.
    pub fn detach_item(&mut self, item: ItemId) -> Option<ItemLocation> {
        if let Some(pos) = self.inventory.iter().position(|&i| i == item) {
            self.inventory.remove(pos);
            return Some(ItemLocation::Inventory);
        }
        self.rooms
            .iter_mut()
            .enumerate()
            .find_map(|(idx, room)| room.remove_item(item).then_some(RoomId(idx)))
            .map(ItemLocation::Room)
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn check_room(&self, id: RoomId) -> CoreResult<()> {
        if id.index() < self.rooms.len() {
            Ok(())
        } else {
            Err(CoreError::UnknownRoom(id))
        }
    }

    fn check_item(&self, id: ItemId) -> CoreResult<()> {
        if id.index() < self.items.len() {
            Ok(())
        } else {
            Err(CoreError::UnknownItem(id))
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// However items are shuffled around, each one is in at most one place.
        #[test]
        fn items_have_a_single_location(moves in prop::collection::vec((0usize..4, 0usize..4), 0..40)) {
            let mut world = World::new("Shuffle");
            for r in 0..3 {
                world.add_room(Room::new(format!("r{r}"), "Room", "A room.")).unwrap();
            }
            for i in 0..4 {
                let id = world.add_item(Item::new(format!("i{i}"), "thing", "A thing.")).unwrap();
                world.place_item(id, RoomId(i % 3)).unwrap();
            }

            for (item, dest) in moves {
                let item = ItemId(item);
                if dest == 3 {
                    world.put_in_inventory(item).unwrap();
                } else {
                    world.place_item(item, RoomId(dest)).unwrap();
                }
            }

            for i in 0..4 {
                let item = ItemId(i);
                let in_inventory = usize::from(world.inventory().contains(&item));
                let in_rooms = world.rooms().iter().filter(|r| r.contains(item)).count();
                prop_assert_eq!(in_inventory + in_rooms, 1);
            }
        }
    }
}
