//! Propagation engine - fans a material price change out to every recipe
//!
//! Given a material whose effective price changed, the engine updates every
//! line item referencing it, recomputes each touched recipe's aggregates,
//! writes per-item change logs, and archives a snapshot per changed recipe.
//!
//! Item writes, the aggregate write, log appends and the snapshot append are
//! independent persistence operations. A failure mid-recipe can leave that
//! recipe partially updated; re-running the propagation (or a price sync)
//! converges it, because unchanged items short-circuit on the price check.

pub mod archiver;
pub mod locks;

use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::identity::EntityId;
use crate::entities::{RecipeChangeLogEntry, RecipeLineItem, SnapshotReason};
use crate::store::{Store, StoreError};

pub use archiver::SnapshotArchiver;
pub use locks::RecipeLocks;

/// Errors that fail an entire propagation call
///
/// Per-recipe persistence failures do not surface here; they are isolated
/// into [`PropagationReport::failed_recipes`].
#[derive(Debug, Error)]
pub enum PropagationError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of one propagation batch
#[derive(Debug, Default, Clone)]
pub struct PropagationReport {
    /// Recipes whose aggregates were updated and snapshotted
    pub updated_recipes: Vec<EntityId>,

    /// Recipes skipped because a persistence operation failed
    pub failed_recipes: Vec<EntityId>,

    /// Line items whose price actually changed
    pub items_changed: usize,

    /// Recipe change-log entries written
    pub logs_written: usize,

    /// Snapshots appended
    pub snapshots_written: usize,
}

/// Fans material price changes out to dependent recipes
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    store: Store,
    archiver: SnapshotArchiver,
    locks: Arc<RecipeLocks>,
}

impl PropagationEngine {
    pub fn new(store: Store) -> Self {
        Self {
            archiver: SnapshotArchiver::new(store.clone()),
            store,
            locks: Arc::new(RecipeLocks::new()),
        }
    }

    /// Apply `new_price` to every line item referencing `material`
    ///
    /// Idempotent per recipe: items already at `new_price` are skipped, so a
    /// re-invocation produces no new logs and no new snapshots. One recipe's
    /// failure is logged and skipped; the rest of the batch still runs.
    pub fn propagate(
        &self,
        material: &EntityId,
        new_price: f64,
        actor: &str,
    ) -> Result<PropagationReport, PropagationError> {
        let items = self.store.items_for_material(material)?;

        // Group by owning recipe; BTreeMap keeps batch order deterministic
        let mut by_recipe: BTreeMap<EntityId, Vec<RecipeLineItem>> = BTreeMap::new();
        for item in items {
            by_recipe.entry(item.recipe.clone()).or_default().push(item);
        }

        debug!(
            material = %material,
            new_price,
            recipes = by_recipe.len(),
            "propagating price change"
        );

        let mut report = PropagationReport::default();

        for (recipe_id, items) in by_recipe {
            let lock = self.locks.for_recipe(&recipe_id);
            let _guard = locks::lock_recipe(&lock);

            match self.propagate_recipe(&recipe_id, items, new_price, actor) {
                Ok(Some(outcome)) => {
                    report.items_changed += outcome.items_changed;
                    report.logs_written += outcome.items_changed;
                    report.snapshots_written += 1;
                    report.updated_recipes.push(recipe_id);
                }
                Ok(None) => {
                    // No item actually changed; recipe left untouched
                }
                Err(e) => {
                    warn!(recipe = %recipe_id, error = %e, "skipping recipe after persistence failure");
                    report.failed_recipes.push(recipe_id);
                }
            }
        }

        Ok(report)
    }

    /// Process one recipe's grouped items; returns None when nothing changed
    fn propagate_recipe(
        &self,
        recipe_id: &EntityId,
        items: Vec<RecipeLineItem>,
        new_price: f64,
        actor: &str,
    ) -> Result<Option<RecipeOutcome>, StoreError> {
        let mut recipe = self.store.recipe(recipe_id)?;
        let mut items_changed = 0usize;

        for item in items {
            // The scan ran outside this recipe's lock; reload so the diff
            // and the logged old value reflect the current stored state
            let mut item = self.store.item(&item.id)?;
            if item.price == new_price {
                continue;
            }

            let old_price = item.price;
            item.price = new_price;
            item.recalculate();
            self.store.save_item(&mut item)?;

            let entry = RecipeChangeLogEntry::price_change(
                recipe.id.clone(),
                item.id.clone(),
                item.material.clone(),
                old_price,
                new_price,
                actor,
                recipe.code.clone(),
            );
            self.store.append_recipe_change(&entry)?;
            items_changed += 1;
        }

        if items_changed == 0 {
            return Ok(None);
        }

        // Reload the full item set: unchanged items count toward the total
        let all_items = self.store.items_for_recipe(recipe_id)?;
        recipe.recalculate_aggregates(&all_items);
        self.store.save_recipe(&mut recipe)?;

        // Snapshot strictly last, after aggregates and all change logs
        self.archiver
            .archive(recipe_id, SnapshotReason::PriceChange, actor)?;

        debug!(
            recipe = %recipe_id,
            items_changed,
            total = recipe.total_raw_material_cost,
            "recipe repriced"
        );

        Ok(Some(RecipeOutcome { items_changed }))
    }
}

struct RecipeOutcome {
    items_changed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use crate::core::project::Project;
    use crate::entities::{Material, Recipe};
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        store: Store,
        engine: PropagationEngine,
        material: EntityId,
        recipe: EntityId,
    }

    /// Material at price 10 used by two items (qty 2 and 3) in one recipe
    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        let store = Store::open(&project);

        let material = Material::new("Flour", "test");
        store.insert_material(&material).unwrap();

        let mut recipe = Recipe::new("BRD-01", "Sourdough", 10.0, "test");
        let i1 = RecipeLineItem::new(recipe.id.clone(), material.id.clone(), 2.0, 10.0);
        let i2 = RecipeLineItem::new(recipe.id.clone(), material.id.clone(), 3.0, 10.0);
        store.insert_item(&i1).unwrap();
        store.insert_item(&i2).unwrap();
        recipe.recalculate_aggregates(&[i1, i2]);
        store.insert_recipe(&recipe).unwrap();

        Fixture {
            _tmp: tmp,
            engine: PropagationEngine::new(store.clone()),
            store,
            material: material.id,
            recipe: recipe.id,
        }
    }

    #[test]
    fn test_propagation_scenario() {
        let f = fixture();

        let report = f.engine.propagate(&f.material, 12.0, "test").unwrap();
        assert_eq!(report.items_changed, 2);
        assert_eq!(report.logs_written, 2);
        assert_eq!(report.snapshots_written, 1);
        assert_eq!(report.updated_recipes, vec![f.recipe.clone()]);
        assert!(report.failed_recipes.is_empty());

        let items = f.store.items_for_recipe(&f.recipe).unwrap();
        let mut totals: Vec<f64> = items.iter().map(|i| i.total_price).collect();
        totals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(totals, vec![24.0, 36.0]);

        let recipe = f.store.recipe(&f.recipe).unwrap();
        assert_eq!(recipe.total_raw_material_cost, 60.0);
        assert_eq!(recipe.price_per_unit, 6.0);

        let logs = f.store.changes_for_recipe(&f.recipe).unwrap();
        assert_eq!(logs.len(), 2);
        for log in &logs {
            assert_eq!(log.old_value, 10.0);
            assert_eq!(log.new_value, 12.0);
            assert_eq!(log.field_changed, "price");
        }

        let snapshots = f.store.snapshots_for_recipe(&f.recipe).unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].total_raw_material_cost, 60.0);
        assert_eq!(snapshots[0].items.len(), 2);
    }

    #[test]
    fn test_propagation_is_idempotent() {
        let f = fixture();

        f.engine.propagate(&f.material, 12.0, "test").unwrap();
        let second = f.engine.propagate(&f.material, 12.0, "test").unwrap();

        assert_eq!(second.items_changed, 0);
        assert_eq!(second.logs_written, 0);
        assert_eq!(second.snapshots_written, 0);
        assert!(second.updated_recipes.is_empty());

        assert_eq!(f.store.changes_for_recipe(&f.recipe).unwrap().len(), 2);
        assert_eq!(f.store.snapshots_for_recipe(&f.recipe).unwrap().len(), 1);
    }

    #[test]
    fn test_no_op_propagation_touches_nothing() {
        let f = fixture();
        let before = f.store.recipe(&f.recipe).unwrap();

        let report = f.engine.propagate(&f.material, 10.0, "test").unwrap();
        assert_eq!(report.items_changed, 0);

        let after = f.store.recipe(&f.recipe).unwrap();
        assert_eq!(after.entity_revision, before.entity_revision);
        assert!(f.store.snapshots_for_recipe(&f.recipe).unwrap().is_empty());
        assert!(f.store.changes_for_recipe(&f.recipe).unwrap().is_empty());
    }

    #[test]
    fn test_unrelated_material_is_a_no_op() {
        let f = fixture();
        let other = EntityId::new(EntityPrefix::Mat);

        let report = f.engine.propagate(&other, 99.0, "test").unwrap();
        assert_eq!(report.items_changed, 0);
        assert!(report.updated_recipes.is_empty());
    }

    #[test]
    fn test_failed_recipe_does_not_block_others() {
        let f = fixture();

        // Second recipe consuming the same material
        let mut other = Recipe::new("BRD-02", "Rye", 5.0, "test");
        let item = RecipeLineItem::new(other.id.clone(), f.material.clone(), 1.0, 10.0);
        store_item_and_recipe(&f.store, &mut other, item);

        // Corrupt the first recipe's aggregate document
        let path = f
            .store
            .root()
            .join("recipes")
            .join(format!("{}.cbk.yaml", f.recipe));
        std::fs::write(&path, ": not yaml :\n- [").unwrap();

        let report = f.engine.propagate(&f.material, 12.0, "test").unwrap();
        assert_eq!(report.failed_recipes, vec![f.recipe.clone()]);
        assert_eq!(report.updated_recipes, vec![other.id.clone()]);

        let updated = f.store.recipe(&other.id).unwrap();
        assert_eq!(updated.total_raw_material_cost, 12.0);
    }

    fn store_item_and_recipe(store: &Store, recipe: &mut Recipe, item: RecipeLineItem) {
        store.insert_item(&item).unwrap();
        recipe.recalculate_aggregates(&[item]);
        store.insert_recipe(recipe).unwrap();
    }

    #[test]
    fn test_aggregate_matches_item_sum_with_foreign_items() {
        let f = fixture();

        // An item for a different material in the same recipe keeps its price
        let other_mat = EntityId::new(EntityPrefix::Mat);
        let fixed = RecipeLineItem::new(f.recipe.clone(), other_mat, 4.0, 2.5);
        f.store.insert_item(&fixed).unwrap();

        f.engine.propagate(&f.material, 12.0, "test").unwrap();

        let recipe = f.store.recipe(&f.recipe).unwrap();
        let items = f.store.items_for_recipe(&f.recipe).unwrap();
        let sum: f64 = items.iter().map(|i| i.total_price).sum();
        assert_eq!(recipe.total_raw_material_cost, sum);
        // 24 + 36 + 10
        assert_eq!(recipe.total_raw_material_cost, 70.0);
    }
}
