//! CSV flattening of the stock collection.

use stockforge_inventory::StockItem;

const HEADER: &str = "ID,Name,Category,Quantity,Quantity KG,Min Stock Limit,Location,Last Updated";

/// One row per item, text fields quoted with embedded quotes doubled,
/// missing weights rendered `N/A`.
pub fn render_stock_items(items: &[StockItem]) -> String {
    let mut rows = Vec::with_capacity(items.len() + 1);
    rows.push(HEADER.to_string());

    for item in items {
        let row = [
            item.id.to_string(),
            quote(&item.name),
            quote(&item.category),
            item.quantity.to_string(),
            item.quantity_kg
                .map(|kg| kg.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            item.min_stock_limit.to_string(),
            quote(&item.location),
            item.last_updated.to_rfc3339(),
        ];
        rows.push(row.join(","));
    }

    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
