//! Customer and owner notifications.
//!
//! Notifications are best-effort: a failed send is logged and dropped, and
//! never affects the lead it was sent for. No email or SMS gateway is wired
//! in; [`LogNotifier`] writes each message to the log instead.

mod messages;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::EngineResult;

pub use messages::{
    Channel, Notification, OWNER_RECIPIENT, format_inventory, normalize_phone, owner_notice,
    quote_submission_sms,
};

/// Delivers rendered notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one notification.
    async fn send(&self, notification: &Notification) -> EngineResult<()>;
}

/// Notifier that logs every message at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, notification: &Notification) -> EngineResult<()> {
        info!(
            channel = notification.channel.as_str(),
            recipient = %notification.recipient,
            subject = notification.subject.as_deref().unwrap_or(""),
            body_len = notification.body.len(),
            "Notification sent"
        );
        Ok(())
    }
}

/// Notifier that keeps every message in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotifier {
    /// Returns a copy of every notification sent so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn send(&self, notification: &Notification) -> EngineResult<()> {
        if let Ok(mut guard) = self.sent.lock() {
            guard.push(notification.clone());
        }
        Ok(())
    }
}

/// Sends a notification, logging and discarding any failure.
///
/// Returns whether the send succeeded.
pub async fn send_best_effort(notifier: &dyn Notifier, notification: &Notification) -> bool {
    match notifier.send(notification).await {
        Ok(()) => true,
        Err(err) => {
            warn!(
                channel = notification.channel.as_str(),
                recipient = %notification.recipient,
                error = %err,
                "Failed to send notification"
            );
            false
        }
    }
}
