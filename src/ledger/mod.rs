//! Pricing ledger - append-only vendor quote timeline
//!
//! The ledger is the source of truth for material prices. The material
//! record's `current_*` fields are a denormalized cache refreshed on every
//! recorded quote; if the cache ever drifts it is recomputable from the quote
//! timeline via [`PricingLedger::sync_latest_price`].

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::identity::{EntityId, EntityPrefix};
use crate::engine::{PropagationEngine, PropagationError};
use crate::entities::{PriceChangeLogEntry, VendorQuote};
use crate::store::{Store, StoreError};

/// Errors from ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Quote quantity must be positive (got {0})")]
    InvalidQuantity(f64),

    #[error("Quote price must not be negative (got {0})")]
    InvalidPrice(f64),

    #[error("Unknown or deleted material: {0}")]
    UnknownMaterial(EntityId),

    #[error("Unknown or deleted vendor: {0}")]
    UnknownVendor(EntityId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Propagation(#[from] PropagationError),
}

/// Parameters for recording a quote
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub material: EntityId,
    pub vendor: EntityId,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub brand: Option<String>,
    pub recorded_by: String,
    /// Defaults to now when absent
    pub effective_date: Option<DateTime<Utc>>,
}

/// Result of a denormalized-price sync
#[derive(Debug, Default, Clone)]
pub struct SyncOutcome {
    /// Whether the material's current price was out of date
    pub changed: bool,

    /// Recipes repriced by the triggered propagation
    pub updated_recipes: Vec<EntityId>,
}

/// Records vendor quotes and keeps the material price cache fresh
#[derive(Debug, Clone)]
pub struct PricingLedger {
    store: Store,
    engine: PropagationEngine,
}

impl PricingLedger {
    pub fn new(store: Store, engine: PropagationEngine) -> Self {
        Self { store, engine }
    }

    /// Record a new vendor quote
    ///
    /// Validates before any write. When the price differs from the prior
    /// quote for the same (material, vendor) pair, exactly one
    /// `PriceChangeLogEntry` is appended before the new quote becomes
    /// authoritative, and the change is propagated into dependent recipes.
    /// The new quote is always appended as a fresh ledger row and the
    /// material's denormalized price cache is refreshed unconditionally.
    pub fn record_quote(&self, request: QuoteRequest) -> Result<VendorQuote, LedgerError> {
        if request.quantity <= 0.0 {
            return Err(LedgerError::InvalidQuantity(request.quantity));
        }
        if request.price < 0.0 {
            return Err(LedgerError::InvalidPrice(request.price));
        }

        let mut material = self
            .store
            .material(&request.material)
            .map_err(|_| LedgerError::UnknownMaterial(request.material.clone()))?;
        if material.deleted {
            return Err(LedgerError::UnknownMaterial(request.material.clone()));
        }

        let vendor = self
            .store
            .vendor(&request.vendor)
            .map_err(|_| LedgerError::UnknownVendor(request.vendor.clone()))?;
        if vendor.deleted {
            return Err(LedgerError::UnknownVendor(request.vendor.clone()));
        }

        // Diff against the most recent prior quote for this pair
        let prior = self
            .store
            .latest_quote_for_pair(&material.id, &vendor.id)?;
        let price_changed = prior.as_ref().is_some_and(|p| p.price != request.price);

        if let Some(prior) = prior.filter(|_| price_changed) {
            let entry = PriceChangeLogEntry {
                id: EntityId::new(EntityPrefix::Pch),
                material: material.id.clone(),
                vendor: vendor.id.clone(),
                vendor_name: vendor.name.clone(),
                old_price: prior.price,
                new_price: request.price,
                quantity: request.quantity,
                unit: request.unit.clone(),
                changed_at: Utc::now(),
                changed_by: request.recorded_by.clone(),
            };
            self.store.append_price_change(&entry)?;
            debug!(
                material = %material.id,
                vendor = %vendor.id,
                old = prior.price,
                new = request.price,
                "price change logged"
            );
        }

        let mut quote = VendorQuote::new(
            material.id.clone(),
            vendor.id.clone(),
            vendor.name.clone(),
            request.quantity,
            &request.unit,
            request.price,
            &request.recorded_by,
        );
        if let Some(effective) = request.effective_date {
            quote.effective_date = effective;
        }
        quote.brand = request.brand;

        // The ledger never overwrites; every quote is a new row
        self.store.append_quote(&quote)?;

        // Cache refresh is unconditional: most recently recorded quote wins
        material.set_current_price(quote.price, quote.vendor_name.clone(), quote.effective_date);
        self.store.save_material(&mut material)?;

        if price_changed {
            // Quote and cache are already authoritative; a propagation
            // failure is recoverable via `sync_latest_price`
            if let Err(e) = self.engine.propagate(&material.id, quote.price, &request.recorded_by) {
                warn!(material = %material.id, error = %e, "propagation failed after quote");
            }
        }

        Ok(quote)
    }

    /// Re-derive the material's current price from the quote timeline
    ///
    /// Finds the most recently dated quote across all vendors and, when it
    /// disagrees with the cached `current_price`, refreshes the cache and
    /// propagates. A no-op when they already agree or no quotes exist.
    pub fn sync_latest_price(
        &self,
        material_id: &EntityId,
        actor: &str,
    ) -> Result<SyncOutcome, LedgerError> {
        let mut material = self
            .store
            .material(material_id)
            .map_err(|_| LedgerError::UnknownMaterial(material_id.clone()))?;

        let quotes = self.store.quotes_for_material(material_id)?;
        let Some(latest) = quotes.into_iter().next() else {
            return Ok(SyncOutcome::default());
        };

        if material.current_price == Some(latest.price) {
            return Ok(SyncOutcome::default());
        }

        material.set_current_price(
            latest.price,
            latest.vendor_name.clone(),
            latest.effective_date,
        );
        self.store.save_material(&mut material)?;

        let report = self.engine.propagate(material_id, latest.price, actor)?;
        Ok(SyncOutcome {
            changed: true,
            updated_recipes: report.updated_recipes,
        })
    }

    /// Quotes for a material, newest-first
    pub fn list_quotes(&self, material: &EntityId) -> Result<Vec<VendorQuote>, LedgerError> {
        Ok(self.store.quotes_for_material(material)?)
    }

    /// Price-change log entries for a material, newest-first
    pub fn price_changes(
        &self,
        material: &EntityId,
    ) -> Result<Vec<PriceChangeLogEntry>, LedgerError> {
        Ok(self.store.price_changes_for_material(material)?)
    }
}
