//! Identity types for content definitions
//!
//! Every content table is keyed by a stable string ID so that RON data files
//! can reference definitions by name. Each domain gets its own newtype so
//! state maps document what they index.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id! {
    /// Identifier for a resource ledger entry ("gold", "scrolls", ...)
    ResourceId
}

string_id! {
    /// Identifier for an action definition
    ActionId
}

string_id! {
    /// Identifier for a skill definition
    SkillId
}

string_id! {
    /// Identifier for a spell definition
    SpellId
}

string_id! {
    /// Identifier for an enemy definition
    EnemyId
}

string_id! {
    /// Identifier for a dungeon definition
    DungeonId
}

string_id! {
    /// Identifier for a house definition
    HouseId
}

string_id! {
    /// Identifier for a housing item definition
    ItemId
}
