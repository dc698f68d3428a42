//! Twilio WhatsApp transport.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::{AlertSender, SendError};

/// Twilio credentials and the WhatsApp sender number.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl TwilioConfig {
    /// Read `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN` and
    /// `TWILIO_WHATSAPP_NUMBER`; `None` unless all three are set.
    pub fn from_env() -> Option<Self> {
        let account_sid = non_empty_var("TWILIO_ACCOUNT_SID")?;
        let auth_token = non_empty_var("TWILIO_AUTH_TOKEN")?;
        let from_number = non_empty_var("TWILIO_WHATSAPP_NUMBER")?;
        Some(Self {
            account_sid,
            auth_token,
            from_number,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Delivers alerts as WhatsApp messages via the Twilio Messages API.
pub struct TwilioWhatsAppSender {
    config: TwilioConfig,
    client: reqwest::Client,
}

impl TwilioWhatsAppSender {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

#[async_trait]
impl AlertSender for TwilioWhatsAppSender {
    async fn send(&self, destination: &str, message: &str) -> Result<(), SendError> {
        let params = [
            ("From", format!("whatsapp:{}", self.config.from_number)),
            ("To", format!("whatsapp:{destination}")),
            ("Body", message.to_string()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|err| SendError::Transport(err.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SendError::Rejected(format!("{status}: {body}")))
    }
}

/// Sender used when Twilio credentials are absent: logs the alert and skips
/// delivery.
pub struct LogOnlySender;

#[async_trait]
impl AlertSender for LogOnlySender {
    async fn send(&self, destination: &str, message: &str) -> Result<(), SendError> {
        info!(%destination, message, "alert delivery disabled; logging only");
        Ok(())
    }
}

/// Pick the transport from the environment.
pub fn sender_from_env() -> Arc<dyn AlertSender> {
    match TwilioConfig::from_env() {
        Some(config) => Arc::new(TwilioWhatsAppSender::new(config)),
        None => {
            warn!("Twilio credentials are not set; low-stock alerts will be logged only");
            Arc::new(LogOnlySender)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_url_embeds_the_account_sid() {
        let sender = TwilioWhatsAppSender::new(TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550000000".to_string(),
        });
        assert_eq!(
            sender.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }
}
