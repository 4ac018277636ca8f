use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of a room: its position in definition order.
///
/// Handles are only meaningful for the [`World`](crate::World) that issued
/// them. The index doubles as the room number written to save files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

/// Handle of an item: its position in definition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl RoomId {
    /// The arena index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl ItemId {
    /// The arena index behind this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room #{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item #{}", self.0)
    }
}
