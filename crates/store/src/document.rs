use serde::{Deserialize, Serialize};

use stockforge_inventory::{AppSettings, StockItem, UsageLog};

/// The single persisted document: three top-level collections, camelCase on
/// disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub stock_items: Vec<StockItem>,
    #[serde(default)]
    pub usage_logs: Vec<UsageLog>,
    #[serde(default)]
    pub settings: AppSettings,
}

impl Document {
    pub fn item(&self, id: stockforge_core::ItemId) -> Option<&StockItem> {
        self.stock_items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: stockforge_core::ItemId) -> Option<&mut StockItem> {
        self.stock_items.iter_mut().find(|item| item.id == id)
    }
}
