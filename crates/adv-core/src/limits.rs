/// Capacity limits of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of rooms.
    pub max_rooms: usize,
    /// Maximum number of items.
    pub max_items: usize,
    /// Maximum number of items the player can carry.
    pub max_inventory: usize,
    /// Maximum number of items lying in a single room.
    pub max_room_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_rooms: 50,
            max_items: 50,
            max_inventory: 20,
            max_room_items: 50,
        }
    }
}

impl Limits {
    /// Set the room limit.
    pub fn with_max_rooms(mut self, max: usize) -> Self {
        self.max_rooms = max;
        self
    }

    /// Set the item limit.
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }

    /// Set the inventory size.
    pub fn with_max_inventory(mut self, max: usize) -> Self {
        self.max_inventory = max;
        self
    }

    /// Set the per-room item limit.
    pub fn with_max_room_items(mut self, max: usize) -> Self {
        self.max_room_items = max;
        self
    }
}
