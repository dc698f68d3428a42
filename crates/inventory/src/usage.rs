use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockforge_core::{DomainError, DomainResult, FieldErrors, ItemId, UsageLogId};

use crate::item::StockItem;

/// An immutable record of stock consumption.
///
/// Created only as a side effect of a successful deduction. The item name is
/// a denormalized copy taken at deduction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLog {
    pub id: UsageLogId,
    pub employee_name: String,
    pub item_id: ItemId,
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_used: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_kg_used: Option<f64>,
    pub usage_date: DateTime<Utc>,
}

/// Input for the usage-logging transaction. At least one of the two
/// quantities must be positive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRequest {
    pub employee_name: String,
    pub item_id: ItemId,
    #[serde(default)]
    pub quantity_used: Option<i64>,
    #[serde(default)]
    pub quantity_kg_used: Option<f64>,
}

impl UsageRequest {
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = FieldErrors::new();
        if self.employee_name.trim().len() < 3 {
            errors.push("employeeName", "Employee name is required");
        }
        if self.quantity_used.is_some_and(|q| q < 0) {
            errors.push("quantityUsed", "Quantity cannot be negative");
        }
        if self.quantity_kg_used.is_some_and(|kg| kg < 0.0) {
            errors.push("quantityKgUsed", "Quantity KG cannot be negative");
        }
        let any_positive = self.quantity_used.is_some_and(|q| q > 0)
            || self.quantity_kg_used.is_some_and(|kg| kg > 0.0);
        if !any_positive {
            errors.push("quantityUsed", "Quantity must be at least 1");
        }
        errors.into_result()
    }

    /// Build the log entry for a completed deduction.
    pub fn into_log(self, item_name: String, now: DateTime<Utc>) -> UsageLog {
        UsageLog {
            id: UsageLogId::new(),
            employee_name: self.employee_name,
            item_id: self.item_id,
            item_name,
            quantity_used: self.quantity_used,
            quantity_kg_used: self.quantity_kg_used,
            usage_date: now,
        }
    }
}

/// Result of a deduction: whether the item was already low before it, so the
/// caller can detect the transition into low stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionOutcome {
    pub was_low: bool,
}

/// Deduct the requested quantities from the item.
///
/// Fails with `InsufficientStock` before any mutation when a requested
/// quantity exceeds what is available; an item that tracks no weight has
/// 0 kg available.
pub fn deduct(
    item: &mut StockItem,
    request: &UsageRequest,
    now: DateTime<Utc>,
) -> DomainResult<DeductionOutcome> {
    let units = request.quantity_used.unwrap_or(0);
    if units > item.quantity {
        return Err(DomainError::insufficient_stock(format!(
            "requested {units} exceeds available {}",
            item.quantity
        )));
    }

    let kg = request.quantity_kg_used.unwrap_or(0.0);
    let kg_available = item.quantity_kg.unwrap_or(0.0);
    if kg > kg_available {
        return Err(DomainError::insufficient_stock(format!(
            "requested {kg} kg exceeds available {kg_available} kg"
        )));
    }

    let was_low = item.is_low_stock();

    item.quantity -= units;
    if kg > 0.0 {
        item.quantity_kg = Some(kg_available - kg);
    }
    item.last_updated = now;

    Ok(DeductionOutcome { was_low })
}
