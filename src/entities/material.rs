//! Material entity type - purchased raw materials
//!
//! The `current_*` fields are a denormalized cache of the pricing ledger:
//! they mirror the most recently recorded quote and are recomputable by
//! replaying the quote timeline. The ledger is the source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A Material entity - a purchased raw material consumed by recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier
    pub id: EntityId,

    /// Material name
    pub name: String,

    /// Category reference (master-data id, owned elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Subcategory reference (master-data id, owned elsewhere)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    /// Unit of measure reference (e.g. "kg", "l")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Denormalized: price from the most recently recorded quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,

    /// Denormalized: vendor name from the most recently recorded quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_vendor_name: Option<String>,

    /// Denormalized: effective date of the most recently recorded quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price_date: Option<DateTime<Utc>>,

    /// Soft-delete flag; deleted materials no longer accept quotes
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    /// Tags for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this material)
    pub author: String,

    /// Entity revision number, bumped on every save
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Material {
    const PREFIX: &'static str = "MAT";

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

impl Material {
    /// Create a new material
    pub fn new(name: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Mat),
            name: name.into(),
            category: None,
            subcategory: None,
            unit: None,
            current_price: None,
            current_vendor_name: None,
            current_price_date: None,
            deleted: false,
            tags: Vec::new(),
            created: Utc::now(),
            author: author.into(),
            entity_revision: 1,
        }
    }

    /// Refresh the denormalized current-price cache from a quote's values
    pub fn set_current_price(
        &mut self,
        price: f64,
        vendor_name: impl Into<String>,
        price_date: DateTime<Utc>,
    ) {
        self.current_price = Some(price);
        self.current_vendor_name = Some(vendor_name.into());
        self.current_price_date = Some(price_date);
    }
}
