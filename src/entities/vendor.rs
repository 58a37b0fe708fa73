//! Vendor entity type - suppliers that quote material prices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A Vendor entity - a supplier submitting price quotes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    /// Unique identifier
    pub id: EntityId,

    /// Vendor name
    pub name: String,

    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Soft-delete flag; deleted vendors no longer accept quotes
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this vendor)
    pub author: String,

    /// Entity revision number, bumped on every save
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Vendor {
    const PREFIX: &'static str = "VEN";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Vendor {
    /// Create a new vendor
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Ven),
            name: name.into(),
            email: None,
            phone: None,
            notes: None,
            deleted: false,
            created: Utc::now(),
            author: author.into(),
            entity_revision: 1,
        }
    }
}
