use std::fmt;
use std::str::FromStr;

use crate::error::{SaveError, SaveResult};

/// Longest accepted slot name.
pub const MAX_SLOT_NAME_LEN: usize = 64;

/// Whether `name` is safe to use as a save file stem: 1-64 ASCII letters,
/// digits, underscores or hyphens. Rules out path separators and `..`.
pub fn is_safe_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_SLOT_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A validated save slot name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotName(String);

impl SlotName {
    /// Validate a slot name.
    pub fn new(name: impl Into<String>) -> SaveResult<Self> {
        let name = name.into();
        if is_safe_slot_name(&name) {
            Ok(Self(name))
        } else {
            Err(SaveError::InvalidSlotName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SlotName {
    type Err = SaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SlotName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        for name in ["mysave123", "my_save_slot", "my-save-slot", "A", "slot1"] {
            assert!(is_safe_slot_name(name), "{name}");
        }
        assert!(is_safe_slot_name(&"x".repeat(MAX_SLOT_NAME_LEN)));
    }

    #[test]
    fn rejects_unsafe_names() {
        for name in [
            "",
            "../etc/passwd",
            "..",
            "a/b",
            "a\\b",
            "slot.sav",
            "my save",
            "slot\0",
            "sälge",
        ] {
            assert!(!is_safe_slot_name(name), "{name:?}");
        }
        assert!(!is_safe_slot_name(&"x".repeat(MAX_SLOT_NAME_LEN + 1)));
    }

    #[test]
    fn slot_name_parse() {
        let slot: SlotName = "quick".parse().unwrap();
        assert_eq!(slot.as_str(), "quick");
        assert_eq!(slot.to_string(), "quick");

        let err = SlotName::new("../x").unwrap_err();
        assert!(matches!(err, SaveError::InvalidSlotName(ref n) if n == "../x"));
    }
}
