//! VendorQuote entity type - append-only pricing ledger rows
//!
//! Multiple quotes may exist for the same (material, vendor) pair over time;
//! the ledger is a timeline, not a table of current rows. Nothing ever
//! overwrites a quote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// A VendorQuote entity - one vendor-submitted price at a point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorQuote {
    /// Unique identifier
    pub id: EntityId,

    /// Material this quote prices (MAT-...)
    pub material: EntityId,

    /// Vendor submitting the quote (VEN-...)
    pub vendor: EntityId,

    /// Vendor name captured at record time
    pub vendor_name: String,

    /// Quoted quantity (must be positive)
    pub quantity: f64,

    /// Unit of measure for the quoted quantity
    pub unit: String,

    /// Quoted unit price (must be non-negative)
    pub price: f64,

    /// Brand reference, if the quote is brand-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// When the quote takes effect
    pub effective_date: DateTime<Utc>,

    /// Who recorded the quote
    pub recorded_by: String,

    /// Record timestamp
    pub created: DateTime<Utc>,
}

impl Entity for VendorQuote {
    const PREFIX: &'static str = "QUOT";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.recorded_by
    }
}

impl VendorQuote {
    /// Create a new quote effective now
    pub fn new(
        material: EntityId,
        vendor: EntityId,
        vendor_name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        price: f64,
        recorded_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(EntityPrefix::Quot),
            material,
            vendor,
            vendor_name: vendor_name.into(),
            quantity,
            unit: unit.into(),
            price,
            brand: None,
            effective_date: now,
            recorded_by: recorded_by.into(),
            created: now,
        }
    }
}
