//! Per-recipe lock registry
//!
//! Two concurrent propagations touching the same recipe would interleave
//! their read-modify-write of the aggregate fields and lose an update. Each
//! recipe's slice of a propagation runs under that recipe's mutex; different
//! recipes never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::identity::EntityId;

/// Registry handing out one mutex per recipe id
#[derive(Debug, Default)]
pub struct RecipeLocks {
    inner: Mutex<HashMap<EntityId, Arc<Mutex<()>>>>,
}

impl RecipeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mutex for a recipe, creating it on first use
    ///
    /// The registry lock is held only for the map lookup, never across the
    /// recipe's own critical section.
    pub fn for_recipe(&self, recipe: &EntityId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(recipe.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Lock a recipe mutex, recovering from poisoning
///
/// A propagation that panicked while holding the lock has already abandoned
/// its writes; the next propagation re-derives everything from the item set,
/// so continuing past the poison is sound.
pub fn lock_recipe(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;

    #[test]
    fn test_same_recipe_shares_a_mutex() {
        let locks = RecipeLocks::new();
        let id = EntityId::new(EntityPrefix::Rcp);

        let a = locks.for_recipe(&id);
        let b = locks.for_recipe(&id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_recipes_do_not_contend() {
        let locks = RecipeLocks::new();
        let a = locks.for_recipe(&EntityId::new(EntityPrefix::Rcp));
        let b = locks.for_recipe(&EntityId::new(EntityPrefix::Rcp));
        assert!(!Arc::ptr_eq(&a, &b));

        let _ga = lock_recipe(&a);
        // Locking b must not block while a is held
        let _gb = lock_recipe(&b);
    }
}
