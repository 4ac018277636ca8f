use std::fmt;

use serde::{Deserialize, Serialize};

/// What a conditional description tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "subject", rename_all = "snake_case")]
pub enum ConditionKind {
    /// The room's description has not been shown yet this session.
    FirstVisit,
    /// The room's visited flag is set.
    Visited,
    /// The player carries the named item.
    HasItem(String),
    /// The current room contains the named item.
    RoomHasItem(String),
    /// The named item has been used at least once, wherever it is now.
    ItemUsed(String),
}

impl ConditionKind {
    /// Resolution priority; higher wins. No match at all is priority 0.
    pub fn priority(&self) -> u8 {
        match self {
            Self::ItemUsed(_) => 4,
            Self::HasItem(_) => 3,
            Self::RoomHasItem(_) => 2,
            Self::FirstVisit | Self::Visited => 1,
        }
    }

    /// The item id this condition refers to, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::HasItem(s) | Self::RoomHasItem(s) | Self::ItemUsed(s) => Some(s),
            Self::FirstVisit | Self::Visited => None,
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstVisit => write!(f, "first_visit"),
            Self::Visited => write!(f, "visited"),
            Self::HasItem(item) => write!(f, "has_item={item}"),
            Self::RoomHasItem(item) => write!(f, "room_has_item={item}"),
            Self::ItemUsed(item) => write!(f, "item_used={item}"),
        }
    }
}

/// A room description that replaces the default while its condition holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalDescription {
    /// The tested condition.
    pub condition: ConditionKind,
    /// Invert the condition.
    pub negate: bool,
    /// Replacement description text.
    pub text: String,
}

impl ConditionalDescription {
    /// Create a non-negated rule.
    pub fn new(condition: ConditionKind, text: impl Into<String>) -> Self {
        Self {
            condition,
            negate: false,
            text: text.into(),
        }
    }

    /// Create a negated rule.
    pub fn negated(condition: ConditionKind, text: impl Into<String>) -> Self {
        Self {
            negate: true,
            ..Self::new(condition, text)
        }
    }
}

impl fmt::Display for ConditionalDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.negate { "!" } else { "" };
        write!(f, "description_if({bang}{}): {}", self.condition, self.text)
    }
}
