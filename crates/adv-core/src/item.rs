use serde::{Deserialize, Serialize};

/// An object in the world.
///
/// Everything except `used` is fixed once the world is loaded. Where the item
/// currently is lives in the [`World`](crate::World), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier used by world files and commands.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Text shown when the item is examined.
    pub description: String,
    /// Whether the player can pick it up.
    pub takeable: bool,
    /// Whether the item is listed in room descriptions.
    pub visible: bool,
    /// Message shown on use. `None` means the item cannot be used.
    pub use_message: Option<String>,
    /// Whether using the item removes it from the game.
    pub use_consumable: bool,
    /// Set the first time the item is used; never cleared during play.
    pub used: bool,
}

impl Item {
    /// Create a visible, fixed, unusable item.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            takeable: false,
            visible: true,
            use_message: None,
            use_consumable: false,
            used: false,
        }
    }

    /// Set whether the item can be picked up.
    pub fn with_takeable(mut self, takeable: bool) -> Self {
        self.takeable = takeable;
        self
    }

    /// Make the item usable.
    ///
    /// An empty message leaves the item unusable, and an unusable item is
    /// never consumable.
    pub fn with_use(mut self, message: impl Into<String>, consumable: bool) -> Self {
        let message = message.into();
        if message.is_empty() {
            self.use_message = None;
            self.use_consumable = false;
        } else {
            self.use_message = Some(message);
            self.use_consumable = consumable;
        }
        self
    }

    /// Whether the item has a use action.
    pub fn is_usable(&self) -> bool {
        self.use_message.is_some()
    }
}
