//! Inventory domain module.
//!
//! This crate contains business rules for stock, usage and settings,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod item;
pub mod report;
pub mod settings;
pub mod usage;

pub use item::{NewStockItem, StockItem, StockItemPatch};
pub use report::{UsageTotal, usage_totals};
pub use settings::AppSettings;
pub use usage::{DeductionOutcome, UsageLog, UsageRequest, deduct};
