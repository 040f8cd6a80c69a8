use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;
use tracing::{info, warn};

use crate::models::notification::Notification;

/// Hands booking and cancellation events to whatever delivers messages.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: &Notification) -> Result<()>;
}

/// Writes notifications to the log. Used when no delivery channel is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, notification: &Notification) -> Result<()> {
        info!(
            kind = ?notification.kind,
            customer = %notification.customer_name,
            service = %notification.service_name,
            date = %notification.date,
            time = %notification.time_range,
            "Notification"
        );
        Ok(())
    }
}

/// Delivers on a detached task. The outcome never reaches the caller.
pub fn dispatch_detached(dispatcher: Arc<dyn NotificationDispatcher>, notification: Notification) {
    tokio::spawn(async move {
        if let Err(e) = dispatcher.dispatch(&notification).await {
            warn!(
                "Failed to deliver {:?} notification for {} on {}: {}",
                notification.kind, notification.customer_name, notification.date, e
            );
        }
    });
}
