//! Prefixed ULID identifiers for stored entities
//!
//! Ids take the form `PREFIX-ULID`, e.g. `ROB-01JC4YB4Z2M8W6K3T1R9QD5H7E`.
//! The prefix makes ids self-describing in listings and on the command line.

use serde::{Deserialize, Serialize};

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityPrefix {
    Robot,
    Reading,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Robot => "ROB",
            EntityPrefix::Reading => "RDG",
        }
    }
}

impl std::str::FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROB" => Ok(EntityPrefix::Robot),
            "RDG" => Ok(EntityPrefix::Reading),
            other => Err(IdParseError::UnknownPrefix(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from parsing an entity id string
#[derive(Debug, thiserror::Error)]
pub enum IdParseError {
    #[error("Unknown entity prefix: {0}")]
    UnknownPrefix(String),

    #[error("Malformed entity id: {0}")]
    Malformed(String),
}

/// A prefixed, ULID-backed entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id with the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        EntityId(format!("{}-{}", prefix.as_str(), ulid::Ulid::new()))
    }

    /// Parse and validate an id string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let (prefix, rest) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::Malformed(s.to_string()))?;
        let _: EntityPrefix = prefix.parse()?;
        if rest.len() != 26 || !rest.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IdParseError::Malformed(s.to_string()));
        }
        Ok(EntityId(s.to_string()))
    }

    /// The prefix portion of the id
    pub fn prefix(&self) -> Option<EntityPrefix> {
        self.0.split('-').next().and_then(|p| p.parse().ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_has_prefix() {
        let id = EntityId::new(EntityPrefix::Robot);
        assert!(id.as_str().starts_with("ROB-"));
        assert_eq!(id.prefix(), Some(EntityPrefix::Robot));
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = EntityId::new(EntityPrefix::Reading);
        let parsed = EntityId::parse(id.as_str()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_unknown_prefix() {
        assert!(EntityId::parse("XYZ-01JC4YB4Z2M8W6K3T1R9QD5H7E").is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(EntityId::parse("ROB").is_err());
        assert!(EntityId::parse("ROB-short").is_err());
    }
}
