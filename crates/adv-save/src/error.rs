//! Error types for saving and loading games.

use thiserror::Error;

/// Result type for save/load operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Errors that can occur while saving or restoring a game.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Slot name would not map to a safe file name.
    #[error("invalid save name \"{0}\": use 1-64 letters, digits, '_' or '-'")]
    InvalidSlotName(String),

    /// No save file exists for the slot.
    #[error("no save named \"{0}\"")]
    NotFound(String),

    /// The document has no `VERSION:` line before its first section.
    #[error("save file has no VERSION line")]
    MissingVersion,

    /// The declared version is outside the supported range.
    #[error("unsupported save version {found} (supported: {min}-{max})")]
    UnsupportedVersion {
        /// Version declared by the file.
        found: u32,
        /// Oldest readable version.
        min: u32,
        /// Newest readable version.
        max: u32,
    },

    /// The document could not be parsed.
    #[error("corrupt save file, line {line}: {message}")]
    Corrupt {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// The save is readable but cannot be applied to this world.
    #[error("save does not fit this world: {0}")]
    Mismatch(String),

    /// The world model rejected a placement.
    #[error(transparent)]
    Model(#[from] adv_core::CoreError),

    /// Underlying file system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
