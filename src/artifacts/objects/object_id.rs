//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings naming content-addressed
//! objects. The oid doubles as the object's filename under `objects/`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use serde::de::Error as _;

/// A 40-character hexadecimal SHA-1 digest identifying an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Check whether a string is a well-formed 40-hex digest.
    pub fn is_valid(id: &str) -> bool {
        id.len() == OBJECT_ID_LENGTH && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Abbreviated form used in human-facing output.
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(10).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for ObjectId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::try_parse(raw).map_err(D::Error::custom)
    }
}
