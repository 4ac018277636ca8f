use crate::id::{ItemId, RoomId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating a world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A bounded collection is full.
    #[error("too many {what} (limit is {limit})")]
    CapacityExceeded {
        /// What ran out of space ("rooms", "items", "inventory slots", ...).
        what: &'static str,
        /// The configured limit that was hit.
        limit: usize,
    },

    /// A room or item with the same id already exists.
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId {
        /// "room" or "item".
        kind: &'static str,
        /// The offending id.
        id: String,
    },

    /// The room handle does not belong to this world.
    #[error("room not found: {0}")]
    UnknownRoom(RoomId),

    /// The item handle does not belong to this world.
    #[error("item not found: {0}")]
    UnknownItem(ItemId),
}
