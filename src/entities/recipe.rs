//! Recipe and RecipeLineItem entity types
//!
//! Line items carry derived fields (`total_price`, `price_per_kg`) and
//! recipes carry derived aggregates (`total_raw_material_cost`,
//! `price_per_unit`). Derived values are only ever written by
//! `recalculate()` / `recalculate_aggregates()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{round2, Entity};
use crate::core::identity::{EntityId, EntityPrefix};

/// A single material line within a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLineItem {
    /// Unique identifier
    pub id: EntityId,

    /// Owning recipe (RCP-...)
    pub recipe: EntityId,

    /// Material consumed (MAT-...)
    pub material: EntityId,

    /// Quantity of material consumed
    pub quantity: f64,

    /// Usable output mass in kg, if tracked for this line
    #[serde(
        rename = "yield",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub yield_amount: Option<f64>,

    /// Unit price currently applied to this line
    pub price: f64,

    /// Derived: quantity * price
    pub total_price: f64,

    /// Derived: total_price / yield, when yield is present and positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,

    /// Entity revision number, bumped on every save
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl RecipeLineItem {
    /// Create a line item and derive its cost fields
    pub fn new(recipe: EntityId, material: EntityId, quantity: f64, price: f64) -> Self {
        let mut item = Self {
            id: EntityId::new(EntityPrefix::Item),
            recipe,
            material,
            quantity,
            yield_amount: None,
            price,
            total_price: 0.0,
            price_per_kg: None,
            entity_revision: 1,
        };
        item.recalculate();
        item
    }

    /// Re-derive `total_price` and `price_per_kg` from quantity/price/yield
    pub fn recalculate(&mut self) {
        self.total_price = self.quantity * self.price;
        self.price_per_kg = match self.yield_amount {
            Some(y) if y > 0.0 => Some(self.total_price / y),
            _ => None,
        };
    }
}

/// A Recipe entity - a batch of line items with cost aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: EntityId,

    /// Recipe code (human-facing key, e.g. "BRD-01")
    pub code: String,

    /// Recipe name
    pub name: String,

    /// Number of units one batch produces
    pub batch_size: f64,

    /// Derived: sum of line item total prices
    #[serde(default)]
    pub total_raw_material_cost: f64,

    /// Derived: total_raw_material_cost / batch_size, rounded to 2 decimals
    #[serde(default)]
    pub price_per_unit: f64,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who created this recipe)
    pub author: String,

    /// Entity revision number, bumped on every save
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

impl Entity for Recipe {
    const PREFIX: &'static str = "RCP";

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

impl Recipe {
    /// Create a new recipe with zeroed aggregates
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        batch_size: f64,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Rcp),
            code: code.into(),
            name: name.into(),
            batch_size,
            total_raw_material_cost: 0.0,
            price_per_unit: 0.0,
            created: Utc::now(),
            author: author.into(),
            entity_revision: 1,
        }
    }

    /// Re-derive the cost aggregates from the full current item set
    pub fn recalculate_aggregates(&mut self, items: &[RecipeLineItem]) {
        self.total_raw_material_cost = items.iter().map(|i| i.total_price).sum();
        self.price_per_unit = if self.batch_size > 0.0 {
            round2(self.total_raw_material_cost / self.batch_size)
        } else {
            0.0
        };
    }
}
