//! Adapter interfaces for change notifications.
//!
//! Every catalog mutation is announced to a remote listener as one line
//! of plain text. Adapters deliver the text on a best-effort basis and
//! never fail the caller.

pub mod notice;
pub mod socket;

use async_trait::async_trait;

pub use notice::ChangeNotice;
pub use socket::{ClientState, NotificationClient, NotifyError, RECEIVE_BUFFER_SIZE};

/// Trait for notification sinks
#[async_trait]
pub trait Notifier: Send {
    /// Human-readable notifier name
    fn name(&self) -> &str;

    /// Deliver one message; returns the listener's reply if there was one.
    ///
    /// Failures are logged and swallowed.
    async fn notify(&mut self, text: &str) -> Option<String>;
}

/// Notifier that only logs messages (offline mode)
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: usize,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages logged so far
    pub fn sent(&self) -> usize {
        self.sent
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&mut self, text: &str) -> Option<String> {
        self.sent += 1;
        tracing::info!(notifier = "log", "Message not sent (offline): {}", text);
        None
    }
}
