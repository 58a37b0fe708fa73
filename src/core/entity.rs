//! Entity trait - common interface for persisted record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::EntityId;

/// Common trait for all costbook entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix (e.g., "MAT", "QUOT")
    const PREFIX: &'static str;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Who created the record
    fn author(&self) -> &str;
}

/// Round a currency amount to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
