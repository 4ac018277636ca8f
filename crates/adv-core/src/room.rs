use serde::{Deserialize, Serialize};

use crate::condition::ConditionalDescription;
use crate::direction::Direction;
use crate::id::{ItemId, RoomId};

/// One exit slot of a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Destination room, if this direction leads anywhere.
    pub target: Option<RoomId>,
    /// Id of the item needed to pass the first time.
    ///
    /// Kept as text: the item may not exist (yet) when the lock is installed.
    pub key: Option<String>,
    /// Sticky runtime flag: once set the key is no longer needed.
    pub unlocked: bool,
}

impl Exit {
    /// Whether passing currently requires the key.
    pub fn is_locked(&self) -> bool {
        self.key.is_some() && !self.unlocked
    }
}

/// A node of the world graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Default description.
    pub description: String,
    /// Set when the player enters the room.
    pub visited: bool,
    /// Set the first time a description of this room is resolved.
    pub description_shown: bool,
    /// Conditional descriptions in definition order.
    pub conditional_descriptions: Vec<ConditionalDescription>,
    exits: [Exit; Direction::COUNT],
    items: Vec<ItemId>,
}

impl Room {
    /// Create a room with no exits, items, or conditional descriptions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            visited: false,
            description_shown: false,
            conditional_descriptions: Vec::new(),
            exits: Default::default(),
            items: Vec::new(),
        }
    }

    /// Append a conditional description.
    pub fn with_conditional(mut self, rule: ConditionalDescription) -> Self {
        self.conditional_descriptions.push(rule);
        self
    }

    /// The exit slot for a direction.
    pub fn exit(&self, dir: Direction) -> &Exit {
        &self.exits[dir.index()]
    }

    /// Mutable access to an exit slot.
    pub fn exit_mut(&mut self, dir: Direction) -> &mut Exit {
        &mut self.exits[dir.index()]
    }

    /// Directions that lead somewhere, in slot order.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.exit(*dir).target.is_some())
    }

    /// Require `key` to pass through `dir` until unlocked.
    pub fn lock_exit(&mut self, dir: Direction, key: impl Into<String>) {
        let exit = self.exit_mut(dir);
        exit.key = Some(key.into());
        exit.unlocked = false;
    }

    /// Items lying in this room, in placement order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Whether the item lies in this room.
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub(crate) fn push_item(&mut self, item: ItemId) {
        self.items.push(item);
    }

    pub(crate) fn remove_item(&mut self, item: ItemId) -> bool {
        if let Some(pos) = self.items.iter().position(|&i| i == item) {
            self.items.remove(pos);
            true
        } else {
            false
        }
    }
}
