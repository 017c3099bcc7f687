//! Single-slot transient notification surface.
//!
//! Only one message is ever pending. Showing a new one replaces the old one
//! and restarts its expiry; there is no queueing. Expiry is a deadline that
//! callers check against the clock, so superseding or dismissing a message
//! needs no timer cancellation.

use std::time::{Duration, Instant};

use serde::Serialize;

/// How long a notification stays up
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A message on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct NotificationSlot {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, message: impl Into<String>, level: NotificationLevel) {
        self.show_at(message, level, Instant::now());
    }

    /// Replace whatever is pending and restart the expiry from `now`
    pub fn show_at(&mut self, message: impl Into<String>, level: NotificationLevel, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            level,
            expires_at: now + self.ttl,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(message, NotificationLevel::Success);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(message, NotificationLevel::Error);
    }

    /// Hide the pending message, returning it
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.current.take()
    }

    /// Drop the message once its deadline has passed. Returns true if it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.is_expired_at(now))
        {
            self.current = None;
            return true;
        }
        false
    }

    /// The message still on screen at `now`
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        self.current.as_ref().filter(|n| !n.is_expired_at(now))
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.visible_at(now).is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.visible_at(now)
            .map(|n| n.expires_at.saturating_duration_since(now))
    }
}
