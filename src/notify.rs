//! Notification queue
//!
//! Store mutations that want a transient UI message push it here; the UI
//! layer drains the queue once per frame and shows whatever it got.

use serde::{Deserialize, Serialize};

/// How long the UI keeps a notification on screen
pub const NOTIFICATION_TTL_MS: f64 = 3000.0;

/// Notification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Info,
    Reward,
    Quest,
    Achievement,
    LevelUp,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✅",
            NotificationKind::Info => "ℹ️",
            NotificationKind::Reward => "💰",
            NotificationKind::Quest => "🎯",
            NotificationKind::Achievement => "🏆",
            NotificationKind::LevelUp => "⭐",
        }
    }
}

/// A single transient message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// IAM amount shown as "+N IAM"
    pub amount: Option<u64>,
}

/// FIFO of pending notifications
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>, amount: Option<u64>) {
        self.next_id += 1;
        self.pending.push(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
            amount,
        });
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
