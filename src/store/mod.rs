//! Document store - one YAML file per entity under the project root
//!
//! The store is a cheap handle passed explicitly into the ledger and engine;
//! there is no process-wide connection state. Mutable entities (materials,
//! recipes, line items) are saved in place with a revision bump. Ledger rows,
//! change logs and snapshots are append-only: the store exposes `append_*`
//! for them and no update or single-row delete.
//!
//! Writes to different entities are independent file operations. There is no
//! cross-entity transaction; callers own the ordering guarantees.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::identity::EntityId;
use crate::core::project::Project;
use crate::entities::{
    Material, PriceChangeLogEntry, Recipe, RecipeChangeLogEntry, RecipeHistorySnapshot,
    RecipeLineItem, Vendor, VendorQuote,
};
use crate::yaml::{parse_yaml_file, write_yaml_file, YamlError};

/// File suffix for entity documents
const FILE_SUFFIX: &str = ".cbk.yaml";

const MATERIALS_DIR: &str = "materials";
const VENDORS_DIR: &str = "vendors";
const RECIPES_DIR: &str = "recipes";
const ITEMS_DIR: &str = "recipes/items";
const QUOTES_DIR: &str = "ledger/quotes";
const PRICE_CHANGES_DIR: &str = "ledger/price-changes";
const RECIPE_CHANGES_DIR: &str = "history/changes";
const SNAPSHOTS_DIR: &str = "history/snapshots";

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {kind} found with id {id}")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Yaml(#[from] YamlError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a project's entity files
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open the store for a project
    pub fn open(project: &Project) -> Self {
        Self {
            root: project.root().to_path_buf(),
        }
    }

    /// The project root this store reads and writes under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entity_path(&self, dir: &str, id: &EntityId) -> PathBuf {
        self.root.join(dir).join(format!("{}{}", id, FILE_SUFFIX))
    }

    fn load<T: serde::de::DeserializeOwned + 'static>(
        &self,
        dir: &str,
        kind: &'static str,
        id: &EntityId,
    ) -> Result<T, StoreError> {
        let path = self.entity_path(dir, id);
        if !path.exists() {
            return Err(StoreError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        Ok(parse_yaml_file(&path)?)
    }

    fn write<T: serde::Serialize>(
        &self,
        dir: &str,
        id: &EntityId,
        value: &T,
    ) -> Result<(), StoreError> {
        let parent = self.root.join(dir);
        if !parent.exists() {
            std::fs::create_dir_all(&parent)?;
        }
        write_yaml_file(&self.entity_path(dir, id), value)?;
        Ok(())
    }

    /// Parse every entity file directly inside `dir`, in id (record) order
    fn list<T: serde::de::DeserializeOwned + 'static>(&self, dir: &str) -> Result<Vec<T>, StoreError> {
        let dir = self.root.join(dir);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.to_string_lossy().ends_with(FILE_SUFFIX))
            .collect();
        paths.sort();

        let mut entities = Vec::with_capacity(paths.len());
        for path in paths {
            entities.push(parse_yaml_file(&path)?);
        }
        Ok(entities)
    }

    // =====================================================================
    // Materials
    // =====================================================================

    pub fn insert_material(&self, material: &Material) -> Result<(), StoreError> {
        self.write(MATERIALS_DIR, &material.id, material)
    }

    pub fn material(&self, id: &EntityId) -> Result<Material, StoreError> {
        self.load(MATERIALS_DIR, "material", id)
    }

    /// Persist a material, bumping its revision
    pub fn save_material(&self, material: &mut Material) -> Result<(), StoreError> {
        material.entity_revision += 1;
        self.write(MATERIALS_DIR, &material.id.clone(), material)
    }

    pub fn list_materials(&self) -> Result<Vec<Material>, StoreError> {
        self.list(MATERIALS_DIR)
    }

    // =====================================================================
    // Vendors
    // =====================================================================

    pub fn insert_vendor(&self, vendor: &Vendor) -> Result<(), StoreError> {
        self.write(VENDORS_DIR, &vendor.id, vendor)
    }

    pub fn vendor(&self, id: &EntityId) -> Result<Vendor, StoreError> {
        self.load(VENDORS_DIR, "vendor", id)
    }

    pub fn list_vendors(&self) -> Result<Vec<Vendor>, StoreError> {
        self.list(VENDORS_DIR)
    }

    // =====================================================================
    // Recipes and line items
    // =====================================================================

    pub fn insert_recipe(&self, recipe: &Recipe) -> Result<(), StoreError> {
        self.write(RECIPES_DIR, &recipe.id, recipe)
    }

    pub fn recipe(&self, id: &EntityId) -> Result<Recipe, StoreError> {
        self.load(RECIPES_DIR, "recipe", id)
    }

    /// Persist a recipe's aggregates, bumping its revision
    pub fn save_recipe(&self, recipe: &mut Recipe) -> Result<(), StoreError> {
        recipe.entity_revision += 1;
        self.write(RECIPES_DIR, &recipe.id.clone(), recipe)
    }

    pub fn list_recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        self.list(RECIPES_DIR)
    }

    pub fn insert_item(&self, item: &RecipeLineItem) -> Result<(), StoreError> {
        self.write(ITEMS_DIR, &item.id, item)
    }

    pub fn item(&self, id: &EntityId) -> Result<RecipeLineItem, StoreError> {
        self.load(ITEMS_DIR, "recipe line item", id)
    }

    /// Persist a line item's derived fields, bumping its revision
    pub fn save_item(&self, item: &mut RecipeLineItem) -> Result<(), StoreError> {
        item.entity_revision += 1;
        self.write(ITEMS_DIR, &item.id.clone(), item)
    }

    /// All line items belonging to one recipe
    pub fn items_for_recipe(&self, recipe: &EntityId) -> Result<Vec<RecipeLineItem>, StoreError> {
        let mut items: Vec<RecipeLineItem> = self.list(ITEMS_DIR)?;
        items.retain(|i| &i.recipe == recipe);
        Ok(items)
    }

    /// All line items referencing one material, across every recipe
    pub fn items_for_material(
        &self,
        material: &EntityId,
    ) -> Result<Vec<RecipeLineItem>, StoreError> {
        let mut items: Vec<RecipeLineItem> = self.list(ITEMS_DIR)?;
        items.retain(|i| &i.material == material);
        Ok(items)
    }

    // =====================================================================
    // Pricing ledger (append-only)
    // =====================================================================

    pub fn append_quote(&self, quote: &VendorQuote) -> Result<(), StoreError> {
        self.write(QUOTES_DIR, &quote.id, quote)
    }

    /// Quotes for a material, newest-first by effective date (id tie-break)
    pub fn quotes_for_material(&self, material: &EntityId) -> Result<Vec<VendorQuote>, StoreError> {
        let mut quotes: Vec<VendorQuote> = self.list(QUOTES_DIR)?;
        quotes.retain(|q| &q.material == material);
        quotes.sort_by(|a, b| {
            b.effective_date
                .cmp(&a.effective_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(quotes)
    }

    /// The most recent quote for a (material, vendor) pair, if any
    ///
    /// Deterministic: latest effective date wins, ULID id breaks ties.
    pub fn latest_quote_for_pair(
        &self,
        material: &EntityId,
        vendor: &EntityId,
    ) -> Result<Option<VendorQuote>, StoreError> {
        let quotes = self.quotes_for_material(material)?;
        Ok(quotes.into_iter().find(|q| &q.vendor == vendor))
    }

    pub fn append_price_change(&self, entry: &PriceChangeLogEntry) -> Result<(), StoreError> {
        self.write(PRICE_CHANGES_DIR, &entry.id, entry)
    }

    /// Price-change log entries for a material, newest-first
    pub fn price_changes_for_material(
        &self,
        material: &EntityId,
    ) -> Result<Vec<PriceChangeLogEntry>, StoreError> {
        let mut entries: Vec<PriceChangeLogEntry> = self.list(PRICE_CHANGES_DIR)?;
        entries.retain(|e| &e.material == material);
        entries.reverse();
        Ok(entries)
    }

    // =====================================================================
    // Recipe audit trail (append-only)
    // =====================================================================

    pub fn append_recipe_change(&self, entry: &RecipeChangeLogEntry) -> Result<(), StoreError> {
        self.write(RECIPE_CHANGES_DIR, &entry.id, entry)
    }

    /// Change-log entries for a recipe, oldest-first
    pub fn changes_for_recipe(
        &self,
        recipe: &EntityId,
    ) -> Result<Vec<RecipeChangeLogEntry>, StoreError> {
        let mut entries: Vec<RecipeChangeLogEntry> = self.list(RECIPE_CHANGES_DIR)?;
        entries.retain(|e| &e.recipe == recipe);
        Ok(entries)
    }

    pub fn append_snapshot(&self, snapshot: &RecipeHistorySnapshot) -> Result<(), StoreError> {
        self.write(SNAPSHOTS_DIR, &snapshot.id, snapshot)
    }

    /// Snapshots for a recipe, oldest-first
    pub fn snapshots_for_recipe(
        &self,
        recipe: &EntityId,
    ) -> Result<Vec<RecipeHistorySnapshot>, StoreError> {
        let mut snapshots: Vec<RecipeHistorySnapshot> = self.list(SNAPSHOTS_DIR)?;
        snapshots.retain(|s| &s.recipe == recipe);
        Ok(snapshots)
    }
}
