//! Outbound notification delivery over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use barberbook_core::{models::notification::Notification, notify::NotificationDispatcher};
use eyre::{Result, WrapErr, eyre};
use tracing::debug;

/// POSTs each notification as JSON to a fixed URL, e.g. a messaging relay
/// that turns it into an SMS or WhatsApp message.
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    url: String,
}

impl WebhookDispatcher {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .wrap_err("Failed to build webhook client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .await
            .wrap_err_with(|| format!("Failed to reach notification webhook {}", self.url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(eyre!("Notification webhook answered {}", status));
        }

        debug!(
            "Delivered {:?} notification for {} on {}",
            notification.kind, notification.customer_name, notification.date
        );
        Ok(())
    }
}
