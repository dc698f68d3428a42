use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockforge_core::{DomainResult, FieldErrors, ItemId};

/// An inventory record with a quantity and a reorder threshold.
///
/// Serialized camelCase to match the on-disk document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    /// Weight-tracked stock, for items counted in kilograms as well as units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_kg: Option<f64>,
    pub min_stock_limit: i64,
    pub location: String,
    pub last_updated: DateTime<Utc>,
}

impl StockItem {
    /// Low stock is always derived from quantity vs threshold, never stored.
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_stock_limit
    }
}

/// Input for creating a stock item. The id and timestamp are assigned by the
/// mutation engine, not the caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStockItem {
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: i64,
    #[serde(default)]
    pub quantity_kg: Option<f64>,
    pub min_stock_limit: i64,
}

impl NewStockItem {
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        if self.category.trim().is_empty() {
            errors.push("category", "Category is required");
        }
        if self.location.trim().is_empty() {
            errors.push("location", "Location is required");
        }
        if self.quantity < 0 {
            errors.push("quantity", "Quantity cannot be negative");
        }
        if self.quantity_kg.is_some_and(|kg| kg < 0.0) {
            errors.push("quantityKg", "Quantity KG cannot be negative");
        }
        if self.min_stock_limit < 0 {
            errors.push("minStockLimit", "Minimum stock cannot be negative");
        }
        errors.into_result()
    }

    /// Materialize the item with a freshly assigned id and timestamp.
    pub fn into_item(self, id: ItemId, now: DateTime<Utc>) -> StockItem {
        StockItem {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            quantity_kg: self.quantity_kg,
            min_stock_limit: self.min_stock_limit,
            location: self.location,
            last_updated: now,
        }
    }
}

/// Partial update: only supplied fields are merged onto the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub quantity_kg: Option<f64>,
    #[serde(default)]
    pub min_stock_limit: Option<i64>,
}

impl StockItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.name.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push("name", "Name is required");
        }
        if self.category.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push("category", "Category is required");
        }
        if self.location.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push("location", "Location is required");
        }
        if self.quantity.is_some_and(|q| q < 0) {
            errors.push("quantity", "Quantity cannot be negative");
        }
        if self.quantity_kg.is_some_and(|kg| kg < 0.0) {
            errors.push("quantityKg", "Quantity KG cannot be negative");
        }
        if self.min_stock_limit.is_some_and(|limit| limit < 0) {
            errors.push("minStockLimit", "Minimum stock cannot be negative");
        }
        errors.into_result()
    }

    /// Merge supplied fields onto the record and refresh its timestamp.
    pub fn apply(self, item: &mut StockItem, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(location) = self.location {
            item.location = location;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(kg) = self.quantity_kg {
            item.quantity_kg = Some(kg);
        }
        if let Some(limit) = self.min_stock_limit {
            item.min_stock_limit = limit;
        }
        item.last_updated = now;
    }
}
