//! Seed data used when no document has been persisted yet.

use chrono::{Duration, Utc};

use stockforge_core::{ItemId, UsageLogId};
use stockforge_inventory::{AppSettings, StockItem, UsageLog};

use crate::document::Document;

fn item(
    name: &str,
    category: &str,
    quantity: i64,
    min_stock_limit: i64,
    location: &str,
) -> StockItem {
    StockItem {
        id: ItemId::new(),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        quantity_kg: None,
        min_stock_limit,
        location: location.to_string(),
        last_updated: Utc::now(),
    }
}

/// Starter inventory: a handful of fasteners and materials, some recent
/// usage against them, and two example alert destinations.
pub fn document() -> Document {
    let screws = item("Screws", "Fasteners", 5000, 1000, "Warehouse A");
    let nuts = item("Nuts", "Fasteners", 8000, 2000, "Warehouse A");
    let bolts = item("Bolts", "Fasteners", 300, 500, "Warehouse A");
    let rivets = item("Rivets", "Fasteners", 10000, 2500, "Warehouse B");
    let plate = item("Aluminum Plate", "Materials", 150, 50, "Warehouse B");

    let usage_logs = vec![
        UsageLog {
            id: UsageLogId::new(),
            employee_name: "John Doe".to_string(),
            item_id: screws.id,
            item_name: screws.name.clone(),
            quantity_used: Some(200),
            quantity_kg_used: None,
            usage_date: Utc::now() - Duration::days(2),
        },
        UsageLog {
            id: UsageLogId::new(),
            employee_name: "Jane Smith".to_string(),
            item_id: nuts.id,
            item_name: nuts.name.clone(),
            quantity_used: Some(500),
            quantity_kg_used: None,
            usage_date: Utc::now() - Duration::days(1),
        },
        UsageLog {
            id: UsageLogId::new(),
            employee_name: "John Doe".to_string(),
            item_id: plate.id,
            item_name: plate.name.clone(),
            quantity_used: Some(5),
            quantity_kg_used: None,
            usage_date: Utc::now(),
        },
    ];

    Document {
        stock_items: vec![screws, nuts, bolts, rivets, plate],
        usage_logs,
        settings: AppSettings {
            phone_numbers: vec!["+15551234567".to_string(), "+15557654321".to_string()],
        },
    }
}
