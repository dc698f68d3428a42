use serde::Deserialize;

use stockforge_inventory::{StockItem, UsageLog, UsageRequest};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /usage/logs`. The item id arrives as a string and is parsed
/// in the handler so a malformed id maps to a 400, not a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogUsageRequest {
    pub employee_name: String,
    pub item_id: String,
    #[serde(default)]
    pub quantity_used: Option<i64>,
    #[serde(default)]
    pub quantity_kg_used: Option<f64>,
}

impl LogUsageRequest {
    pub fn into_usage_request(self, item_id: stockforge_core::ItemId) -> UsageRequest {
        UsageRequest {
            employee_name: self.employee_name,
            item_id,
            quantity_used: self.quantity_used,
            quantity_kg_used: self.quantity_kg_used,
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn item_to_json(item: &StockItem) -> serde_json::Value {
    serde_json::json!({
        "id": item.id.to_string(),
        "name": item.name,
        "category": item.category,
        "quantity": item.quantity,
        "quantityKg": item.quantity_kg,
        "minStockLimit": item.min_stock_limit,
        "location": item.location,
        "lastUpdated": item.last_updated.to_rfc3339(),
        "lowStock": item.is_low_stock(),
    })
}

pub fn log_to_json(log: &UsageLog) -> serde_json::Value {
    serde_json::json!({
        "id": log.id.to_string(),
        "employeeName": log.employee_name,
        "itemId": log.item_id.to_string(),
        "itemName": log.item_name,
        "quantityUsed": log.quantity_used,
        "quantityKgUsed": log.quantity_kg_used,
        "usageDate": log.usage_date.to_rfc3339(),
    })
}
