use serde::{Deserialize, Serialize};

/// Destination addresses for low-stock notifications.
///
/// Singleton within the document; replaced wholesale on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub phone_numbers: Vec<String>,
}
