//! Record identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

record_id!(
    /// Identifier of a notebook
    NotebookId
);
record_id!(
    /// Identifier of a journal entry
    EntryId
);
record_id!(
    /// Identifier of a stored version snapshot
    VersionId
);
record_id!(
    /// Identifier of a tag
    TagId
);

/// An authenticated user, as provided by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(name: impl Into<String>) -> Self {
        UserId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Explicit request context passed to every query and command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user: UserId,
}

impl UserContext {
    pub fn new(user: impl Into<String>) -> Self {
        UserContext {
            user: UserId::new(user),
        }
    }

    pub fn owns(&self, owner: &UserId) -> bool {
        &self.user == owner
    }
}
