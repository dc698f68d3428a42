//! Low-stock alert delivery.
//!
//! Alerting is a fire-and-forget side effect: delivery failures are logged
//! per destination and never affect the transaction that triggered them.

use async_trait::async_trait;
use tracing::{error, info};

use stockforge_inventory::StockItem;

pub mod twilio;

pub use twilio::{LogOnlySender, TwilioConfig, TwilioWhatsAppSender, sender_from_env};

/// Delivery error for a single destination.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("rejected by provider: {0}")]
    Rejected(String),
}

/// Capability to deliver one message to one destination.
#[async_trait]
pub trait AlertSender: Send + Sync {
    async fn send(&self, destination: &str, message: &str) -> Result<(), SendError>;
}

/// The alert text for an item that crossed into low stock.
pub fn low_stock_message(item: &StockItem) -> String {
    format!(
        "StockForge alert: stock for \"{}\" is low. Current quantity: {}. Minimum limit: {}.",
        item.name, item.quantity, item.min_stock_limit
    )
}

/// Deliver the low-stock alert to every configured destination.
///
/// One destination's failure never blocks the others. Returns the number of
/// successful deliveries (callers discard it; tests don't).
pub async fn dispatch_low_stock_alert(
    sender: &dyn AlertSender,
    destinations: &[String],
    item: &StockItem,
) -> usize {
    if destinations.is_empty() {
        return 0;
    }

    let message = low_stock_message(item);
    info!(item = %item.name, quantity = item.quantity, "low stock alert triggered");

    let mut delivered = 0;
    for destination in destinations {
        match sender.send(destination, &message).await {
            Ok(()) => {
                info!(%destination, "low stock alert delivered");
                delivered += 1;
            }
            Err(err) => {
                error!(%destination, %err, "failed to deliver low stock alert");
            }
        }
    }
    delivered
}
