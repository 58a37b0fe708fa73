//! Entity type definitions

pub mod history;
pub mod material;
pub mod quote;
pub mod recipe;
pub mod vendor;

pub use history::{
    PriceChangeLogEntry, RecipeChangeLogEntry, RecipeHistorySnapshot, SnapshotReason,
};
pub use material::Material;
pub use quote::VendorQuote;
pub use recipe::{Recipe, RecipeLineItem};
pub use vendor::Vendor;
