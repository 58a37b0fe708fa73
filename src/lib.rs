//! Costbook: plain-text material price and recipe cost tracking
//!
//! Tracks vendor-quoted prices for purchased materials as an append-only
//! ledger of YAML files, and keeps every recipe consuming those materials
//! numerically consistent with the latest price: line-item costs, recipe
//! aggregates, and an immutable audit trail of change logs and snapshots.

pub mod cli;
pub mod core;
pub mod engine;
pub mod entities;
pub mod ledger;
pub mod store;
pub mod yaml;
