//! Build document identity using prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Unique identifier for a saved build document ("BLD-" + ULID).
///
/// ULIDs sort lexicographically by creation time, so build files list in
/// save order for free.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildId(Ulid);

impl BuildId {
    const PREFIX: &'static str = "BLD";

    /// Mint a fresh id
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parse a BuildId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl Default for BuildId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::PREFIX, self.0)
    }
}

impl FromStr for BuildId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        if prefix != Self::PREFIX {
            return Err(IdParseError::InvalidPrefix(prefix.to_string()));
        }

        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Serialize for BuildId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BuildId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing build IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid build ID prefix: '{0}' (expected BLD)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in build ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_id_generation() {
        let id = BuildId::new();
        assert!(id.to_string().starts_with("BLD-"));
        assert_eq!(id.to_string().len(), 30); // BLD- (4) + ULID (26)
    }

    #[test]
    fn test_build_id_roundtrip() {
        let original = BuildId::new();
        let parsed = BuildId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_build_id_invalid_prefix() {
        let err = BuildId::parse("REQ-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_build_id_missing_delimiter() {
        let err = BuildId::parse("BLD01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_build_id_invalid_ulid() {
        let err = BuildId::parse("BLD-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_build_id_serde() {
        let id = BuildId::new();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: BuildId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
