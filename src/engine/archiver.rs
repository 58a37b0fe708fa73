//! Snapshot archiver - immutable copies of a recipe's cost state
//!
//! A snapshot deep-copies the recipe's aggregates and complete line-item set
//! at call time. Callers write it strictly after the batch's aggregate update
//! and change-log appends, so log timestamps precede the snapshot timestamp.

use chrono::Utc;

use crate::core::identity::{EntityId, EntityPrefix};
use crate::entities::{RecipeHistorySnapshot, SnapshotReason};
use crate::store::{Store, StoreError};

/// Appends immutable recipe history snapshots
#[derive(Debug, Clone)]
pub struct SnapshotArchiver {
    store: Store,
}

impl SnapshotArchiver {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Capture and append a snapshot of the recipe's current cost state
    pub fn archive(
        &self,
        recipe: &EntityId,
        reason: SnapshotReason,
        actor: &str,
    ) -> Result<RecipeHistorySnapshot, StoreError> {
        let recipe = self.store.recipe(recipe)?;
        let items = self.store.items_for_recipe(&recipe.id)?;

        let snapshot = RecipeHistorySnapshot {
            id: EntityId::new(EntityPrefix::Snap),
            recipe: recipe.id.clone(),
            recipe_code: recipe.code.clone(),
            recipe_name: recipe.name.clone(),
            snapshot_at: Utc::now(),
            total_raw_material_cost: recipe.total_raw_material_cost,
            price_per_unit: recipe.price_per_unit,
            items,
            reason,
            changed_by: actor.to_string(),
        };

        self.store.append_snapshot(&snapshot)?;
        Ok(snapshot)
    }
}
