//! Audit trail entity types - change logs and immutable snapshots
//!
//! All three collections are append-only. Entries are never edited after the
//! fact; a bulk history clear is the only deletion path and lives outside
//! the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::recipe::RecipeLineItem;

/// Field name recorded on line-item change logs
pub const FIELD_PRICE: &str = "price";

/// Why a snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotReason {
    /// A material price change propagated into this recipe
    PriceChange,
    /// Explicitly requested archive
    Manual,
}

impl std::fmt::Display for SnapshotReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotReason::PriceChange => write!(f, "price_change"),
            SnapshotReason::Manual => write!(f, "manual"),
        }
    }
}

/// Audit record for one quote-to-quote price change on a (material, vendor) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceChangeLogEntry {
    /// Unique identifier
    pub id: EntityId,

    /// Material whose price changed (MAT-...)
    pub material: EntityId,

    /// Vendor the change applies to (VEN-...)
    pub vendor: EntityId,

    /// Vendor name captured at change time
    pub vendor_name: String,

    /// Price on the prior quote
    pub old_price: f64,

    /// Price on the new quote
    pub new_price: f64,

    /// Quantity on the new quote
    pub quantity: f64,

    /// Unit on the new quote
    pub unit: String,

    /// When the change was recorded
    pub changed_at: DateTime<Utc>,

    /// Who recorded the new quote
    pub changed_by: String,
}

impl Entity for PriceChangeLogEntry {
    const PREFIX: &'static str = "PCH";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.changed_at
    }

    fn author(&self) -> &str {
        &self.changed_by
    }
}

/// Audit record for one line-item price change during propagation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeChangeLogEntry {
    /// Unique identifier
    pub id: EntityId,

    /// Owning recipe (RCP-...)
    pub recipe: EntityId,

    /// Changed line item (ITEM-...)
    pub recipe_item: EntityId,

    /// Material driving the change (MAT-...)
    pub material: EntityId,

    /// Which field changed (always "price" for propagation)
    pub field_changed: String,

    /// Value before the change
    pub old_value: f64,

    /// Value after the change
    pub new_value: f64,

    /// When the change was applied
    pub changed_at: DateTime<Utc>,

    /// Actor on whose behalf propagation ran
    pub changed_by: String,

    /// Recipe code captured at change time
    pub recipe_code: String,
}

impl Entity for RecipeChangeLogEntry {
    const PREFIX: &'static str = "RCL";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.changed_at
    }

    fn author(&self) -> &str {
        &self.changed_by
    }
}

impl RecipeChangeLogEntry {
    /// Create a price-change log entry for a line item
    pub fn price_change(
        recipe: EntityId,
        recipe_item: EntityId,
        material: EntityId,
        old_value: f64,
        new_value: f64,
        changed_by: impl Into<String>,
        recipe_code: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Rcl),
            recipe,
            recipe_item,
            material,
            field_changed: FIELD_PRICE.to_string(),
            old_value,
            new_value,
            changed_at: Utc::now(),
            changed_by: changed_by.into(),
            recipe_code: recipe_code.into(),
        }
    }
}

/// Immutable copy of a recipe's full cost state at a propagation event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeHistorySnapshot {
    /// Unique identifier
    pub id: EntityId,

    /// Snapshotted recipe (RCP-...)
    pub recipe: EntityId,

    /// Recipe code at snapshot time
    pub recipe_code: String,

    /// Recipe name at snapshot time
    pub recipe_name: String,

    /// When the snapshot was taken
    pub snapshot_at: DateTime<Utc>,

    /// Aggregate cost at snapshot time
    pub total_raw_material_cost: f64,

    /// Per-unit price at snapshot time
    pub price_per_unit: f64,

    /// Deep copy of the recipe's complete line-item set
    pub items: Vec<RecipeLineItem>,

    /// Why the snapshot was taken
    pub reason: SnapshotReason,

    /// Actor on whose behalf the snapshot was taken
    pub changed_by: String,
}

impl Entity for RecipeHistorySnapshot {
    const PREFIX: &'static str = "SNAP";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.snapshot_at
    }

    fn author(&self) -> &str {
        &self.changed_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::recipe::Recipe;

    #[test]
    fn test_reason_serializes_snake_case() {
        let yaml = serde_yml::to_string(&SnapshotReason::PriceChange).unwrap();
        assert_eq!(yaml.trim(), "price_change");
        assert_eq!(SnapshotReason::PriceChange.to_string(), "price_change");
    }

    #[test]
    fn test_recipe_change_log_defaults_to_price_field() {
        let recipe = EntityId::new(EntityPrefix::Rcp);
        let item = EntityId::new(EntityPrefix::Item);
        let material = EntityId::new(EntityPrefix::Mat);

        let entry = RecipeChangeLogEntry::price_change(
            recipe, item, material, 10.0, 12.0, "test", "BRD-01",
        );

        assert!(entry.id.to_string().starts_with("RCL-"));
        assert_eq!(entry.field_changed, "price");
        assert_eq!(entry.old_value, 10.0);
        assert_eq!(entry.new_value, 12.0);
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_items() {
        let rcp = Recipe::new("BRD-01", "Sourdough", 10.0, "test");
        let item = RecipeLineItem::new(
            rcp.id.clone(),
            EntityId::new(EntityPrefix::Mat),
            2.0,
            10.0,
        );

        let snap = RecipeHistorySnapshot {
            id: EntityId::new(EntityPrefix::Snap),
            recipe: rcp.id.clone(),
            recipe_code: rcp.code.clone(),
            recipe_name: rcp.name.clone(),
            snapshot_at: Utc::now(),
            total_raw_material_cost: 20.0,
            price_per_unit: 2.0,
            items: vec![item],
            reason: SnapshotReason::PriceChange,
            changed_by: "test".to_string(),
        };

        let yaml = serde_yml::to_string(&snap).unwrap();
        let parsed: RecipeHistorySnapshot = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].total_price, 20.0);
        assert_eq!(parsed.reason, SnapshotReason::PriceChange);
    }
}
