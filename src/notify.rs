//! Transient user-facing messages. A new message replaces the current one; nothing queues.

use std::time::{Duration, Instant};

use tracing::warn;

pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Debug)]
pub struct Notifier {
    duration: Duration,
    current: Option<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DURATION)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        warn!(%message, "notification");
        self.current = Some(Notification {
            message,
            shown_at: now,
        });
    }

    /// The visible message at `now`, if it has not expired.
    pub fn current(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.shown_at) < self.duration)
            .map(|n| n.message.as_str())
    }

    /// Last message shown, expired or not.
    pub fn last(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
#[path = "../tests/unit/notify/notify.rs"]
mod tests;
