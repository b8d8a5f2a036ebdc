use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL_MS: i64 = 5_000;

/// Styling class of a notification; `Display` gives the CSS class name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// A confirmed transaction or a completed connect.
    Success,
    /// Any failed action.
    Error,
    /// Neither, such as the owner-address lookup placeholder.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Text shown to the user.
    pub message: String,
    pub severity: Severity,
    /// Increases with every `notify`; a dismissal carrying an older ticket
    /// belongs to a superseded notification and is ignored.
    pub ticket: u64,
    /// When the host should send this ticket back through `dismiss`.
    pub dismiss_at: DateTime<Utc>,
}

/// Single-slot notification area with a timed auto-dismiss.
#[derive(Clone, Debug)]
pub struct NotificationChannel {
    slot: Option<Notification>,
    next_ticket: u64,
    ttl: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::with_ttl(Duration::milliseconds(NOTIFICATION_TTL_MS))
    }
}

impl NotificationChannel {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: None,
            next_ticket: 1,
            ttl,
        }
    }

    /// Show `message`, superseding whatever is displayed and restarting the timer.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
    ) -> &Notification {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.slot.insert(Notification {
            message: message.into(),
            severity,
            ticket,
            dismiss_at: now + self.ttl,
        })
    }

    /// Timer callback: clears the slot only if `ticket` is still the one shown.
    pub fn dismiss(&mut self, ticket: u64) -> bool {
        if self.slot.as_ref().is_some_and(|n| n.ticket == ticket) {
            self.slot = None;
            true
        } else {
            false
        }
    }
}
