//! Entity identifiers - typed prefix plus ULID
//!
//! Ids render as `PREFIX-ULID` (e.g. `MAT-01ARZ3NDEKTSV4RRFFQ69G5FAV`).
//! ULIDs are lexicographically sortable by mint time, so sorting ids of one
//! prefix yields record order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityPrefix {
    /// Material
    Mat,
    /// Vendor
    Ven,
    /// Recipe
    Rcp,
    /// Recipe line item
    Item,
    /// Vendor quote
    Quot,
    /// Price change log entry
    Pch,
    /// Recipe change log entry
    Rcl,
    /// Recipe history snapshot
    Snap,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Mat => "MAT",
            EntityPrefix::Ven => "VEN",
            EntityPrefix::Rcp => "RCP",
            EntityPrefix::Item => "ITEM",
            EntityPrefix::Quot => "QUOT",
            EntityPrefix::Pch => "PCH",
            EntityPrefix::Rcl => "RCL",
            EntityPrefix::Snap => "SNAP",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MAT" => Ok(EntityPrefix::Mat),
            "VEN" => Ok(EntityPrefix::Ven),
            "RCP" => Ok(EntityPrefix::Rcp),
            "ITEM" => Ok(EntityPrefix::Item),
            "QUOT" => Ok(EntityPrefix::Quot),
            "PCH" => Ok(EntityPrefix::Pch),
            "RCL" => Ok(EntityPrefix::Rcl),
            "SNAP" => Ok(EntityPrefix::Snap),
            other => Err(IdParseError::UnknownPrefix(other.to_string())),
        }
    }
}

/// Errors parsing an entity id from its string form
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("Invalid entity id: unknown prefix '{0}'")]
    UnknownPrefix(String),

    #[error("Invalid entity id: expected PREFIX-ULID, got '{0}'")]
    Malformed(String),

    #[error("Invalid entity id: bad ULID in '{0}'")]
    InvalidUlid(String),
}

/// A typed entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId {
    pub prefix: EntityPrefix,
    pub ulid: Ulid,
}

impl EntityId {
    /// Mint a fresh id with the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, ulid) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::Malformed(s.to_string()))?;
        let prefix = EntityPrefix::from_str(prefix)?;
        let ulid =
            Ulid::from_string(ulid).map_err(|_| IdParseError::InvalidUlid(s.to_string()))?;
        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
