//! Entity identifiers
//!
//! Ids are opaque strings on the wire. Newly created entities get a UUID v4.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh random id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl rusqlite::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                String::column_result(value).map(Self)
            }
        }
    };
}

string_id!(
    /// Identifier of a grocery item
    ItemId
);

string_id!(
    /// Identifier of a grocery list
    ListId
);

/// Reference to the user owning a list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(owner: &str) -> super::DomainResult<Self> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(super::DomainError::InvalidInput(
                "createdBy must not be empty".to_string(),
            ));
        }
        Ok(Self(owner.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ListId::generate(), ListId::generate());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = ItemId::from("i1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"i1\"");
    }

    #[test]
    fn test_owner_is_trimmed_and_required() {
        assert_eq!(OwnerId::new("  alice ").unwrap().as_str(), "alice");
        assert!(OwnerId::new("   ").is_err());
    }
}
