//! Error types for the fiction engine.

use adv_save::SaveError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur during a play session.
///
/// Ordinary player mistakes ("You can't go that way.") are replies, not
/// errors. These are the failures a front end may want to report differently.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A save command was issued but the session has no save store.
    #[error("saving is not available in this session")]
    NoSaveStore,

    /// Save slot problem.
    #[error(transparent)]
    Save(#[from] SaveError),
}
