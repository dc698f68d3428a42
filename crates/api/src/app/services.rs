//! Service layer: the transactional boundary over the document store.
//!
//! Every mutating operation is one read-modify-write cycle over the whole
//! document, serialized within this process by a mutex. Cross-process
//! writers still race (last writer wins) — an accepted limitation of the
//! single-file store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::error;

use stockforge_alerts::{AlertSender, dispatch_low_stock_alert};
use stockforge_core::{DomainError, DomainResult, ItemId};
use stockforge_inventory::{
    AppSettings, NewStockItem, StockItem, StockItemPatch, UsageLog, UsageRequest, UsageTotal,
    deduct, usage_totals,
};
use stockforge_store::{Document, DocumentStore};

/// Result of the usage-logging transaction: the appended log, the updated
/// item and its pre-deduction state.
#[derive(Debug, Clone)]
pub struct UsageOutcome {
    pub log: UsageLog,
    pub item: StockItem,
    pub was_low: bool,
}

impl UsageOutcome {
    /// The sole trigger condition for alerting: the item is low now and was
    /// not before this transaction.
    pub fn crossed_into_low_stock(&self) -> bool {
        self.item.is_low_stock() && !self.was_low
    }
}

pub struct AppServices {
    store: Arc<dyn DocumentStore>,
    sender: Arc<dyn AlertSender>,
    txn: Mutex<()>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, sender: Arc<dyn AlertSender>) -> Self {
        Self {
            store,
            sender,
            txn: Mutex::new(()),
        }
    }

    /// Load, mutate in memory, persist in full. Nothing is saved when the
    /// closure fails.
    fn with_transaction<T>(
        &self,
        f: impl FnOnce(&mut Document) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let _guard = self.txn.lock().unwrap();
        let mut document = self.store.load()?;
        let value = f(&mut document)?;
        self.store.save(&document)?;
        Ok(value)
    }

    fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> DomainResult<T> {
        let document = self.store.load()?;
        Ok(f(&document))
    }

    // -------------------------
    // Stock mutation engine
    // -------------------------

    /// All items, sorted by name.
    pub fn list_items(&self) -> DomainResult<Vec<StockItem>> {
        self.read(|doc| {
            let mut items = doc.stock_items.clone();
            items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            items
        })
    }

    pub fn get_item(&self, id: ItemId) -> DomainResult<StockItem> {
        self.read(|doc| doc.item(id).cloned())?
            .ok_or(DomainError::NotFound)
    }

    /// Assign a fresh id and timestamp, append, return the created item.
    /// An item created already below its threshold alerts immediately.
    pub async fn create_item(&self, input: NewStockItem) -> DomainResult<StockItem> {
        input.validate()?;

        let item = self.with_transaction(|doc| {
            let item = input.into_item(ItemId::new(), Utc::now());
            doc.stock_items.push(item.clone());
            Ok(item)
        })?;

        if item.is_low_stock() {
            self.alert_low_stock(&item).await;
        }
        Ok(item)
    }

    /// Merge supplied fields, refresh the timestamp. Alerts only on the
    /// transition into low stock; restocking above the threshold is silent.
    pub async fn update_item(&self, id: ItemId, patch: StockItemPatch) -> DomainResult<StockItem> {
        patch.validate()?;

        let (item, was_low) = self.with_transaction(|doc| {
            let item = doc.item_mut(id).ok_or(DomainError::NotFound)?;
            let was_low = item.is_low_stock();
            patch.apply(item, Utc::now());
            Ok((item.clone(), was_low))
        })?;

        if item.is_low_stock() && !was_low {
            self.alert_low_stock(&item).await;
        }
        Ok(item)
    }

    /// Remove by id; reports whether a record was actually removed.
    pub fn delete_item(&self, id: ItemId) -> DomainResult<bool> {
        self.with_transaction(|doc| {
            let before = doc.stock_items.len();
            doc.stock_items.retain(|item| item.id != id);
            Ok(doc.stock_items.len() < before)
        })
    }

    // -------------------------
    // Usage-logging transaction
    // -------------------------

    /// Validate, deduct, append the log, persist — then fire the transition
    /// alert if the deduction dropped the item below its threshold.
    pub async fn log_usage(&self, request: UsageRequest) -> DomainResult<UsageOutcome> {
        request.validate()?;

        let outcome = self.with_transaction(|doc| {
            let now = Utc::now();
            let item = doc.item_mut(request.item_id).ok_or(DomainError::NotFound)?;
            let deduction = deduct(item, &request, now)?;
            let item = item.clone();

            let log = request.into_log(item.name.clone(), now);
            doc.usage_logs.push(log.clone());

            Ok(UsageOutcome {
                log,
                item,
                was_low: deduction.was_low,
            })
        })?;

        if outcome.crossed_into_low_stock() {
            self.alert_low_stock(&outcome.item).await;
        }
        Ok(outcome)
    }

    /// All usage logs, newest first.
    pub fn list_logs(&self) -> DomainResult<Vec<UsageLog>> {
        self.read(|doc| {
            let mut logs = doc.usage_logs.clone();
            logs.sort_by(|a, b| b.usage_date.cmp(&a.usage_date));
            logs
        })
    }

    // -------------------------
    // Settings & reporting
    // -------------------------

    pub fn settings(&self) -> DomainResult<AppSettings> {
        self.read(|doc| doc.settings.clone())
    }

    /// Replace the settings wholesale.
    pub fn update_settings(&self, settings: AppSettings) -> DomainResult<AppSettings> {
        self.with_transaction(|doc| {
            doc.settings = settings;
            Ok(doc.settings.clone())
        })
    }

    pub fn usage_report(&self, since: Option<DateTime<Utc>>) -> DomainResult<Vec<UsageTotal>> {
        self.read(|doc| usage_totals(&doc.usage_logs, since))
    }

    pub fn export_stock_csv(&self) -> DomainResult<String> {
        let items = self.list_items()?;
        Ok(crate::app::csv::render_stock_items(&items))
    }

    // -------------------------
    // Alerting
    // -------------------------

    /// Fire-and-forget: delivery problems are logged and never surface to
    /// the caller.
    async fn alert_low_stock(&self, item: &StockItem) {
        let settings = match self.settings() {
            Ok(settings) => settings,
            Err(err) => {
                error!(%err, "failed to load alert destinations");
                return;
            }
        };
        dispatch_low_stock_alert(self.sender.as_ref(), &settings.phone_numbers, item).await;
    }
}
