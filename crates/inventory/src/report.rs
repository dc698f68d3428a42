use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::usage::UsageLog;

/// Aggregated consumption for one item over a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTotal {
    pub item_name: String,
    pub quantity_used: i64,
    pub quantity_kg_used: f64,
}

/// Sum usage per item name over logs dated at or after `since`, most-used
/// first. `None` means all time.
pub fn usage_totals(logs: &[UsageLog], since: Option<DateTime<Utc>>) -> Vec<UsageTotal> {
    let mut by_item: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    for log in logs {
        if since.is_some_and(|start| log.usage_date < start) {
            continue;
        }
        let entry = by_item.entry(log.item_name.as_str()).or_default();
        entry.0 += log.quantity_used.unwrap_or(0);
        entry.1 += log.quantity_kg_used.unwrap_or(0.0);
    }

    let mut totals: Vec<UsageTotal> = by_item
        .into_iter()
        .map(|(name, (units, kg))| UsageTotal {
            item_name: name.to_string(),
            quantity_used: units,
            quantity_kg_used: kg,
        })
        .collect();
    // BTreeMap iteration gives a stable name order for equal quantities.
    totals.sort_by(|a, b| b.quantity_used.cmp(&a.quantity_used));
    totals
}
