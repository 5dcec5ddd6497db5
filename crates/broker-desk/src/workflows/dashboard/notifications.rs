use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Transient message shown after an action settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Auto-dismissing notification queue for one session.
#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    next_id: u64,
    entries: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Notification {
        self.push("Success", message, NotificationVariant::Default, now)
    }

    pub fn failure(&mut self, message: impl Into<String>, now: DateTime<Utc>) -> Notification {
        self.push("Error", message, NotificationVariant::Destructive, now)
    }

    pub fn push(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        variant: NotificationVariant,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: self.next_id,
            title: title.into(),
            message: message.into(),
            variant,
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.next_id += 1;
        self.entries.push(notification.clone());
        notification
    }

    /// Drop expired entries and return the ones still on screen, oldest first.
    pub fn active(&mut self, now: DateTime<Utc>) -> Vec<Notification> {
        self.entries.retain(|entry| !entry.is_expired(now));
        self.entries.clone()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }
}
