// User-facing toasts raised by grid actions
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub category: NotificationCategory,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(category: NotificationCategory, message: impl Into<String>) -> Self {
        Self { category, message: message.into(), created_at: Utc::now() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationCategory::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationCategory::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationCategory::Error, message)
    }
}

/// Bounded list of live notifications; the oldest is dropped when full.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationQueue {
    items: Vec<(u64, Notification)>,
    next_id: u64,
    capacity: usize,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_capacity(5)
    }
}

impl NotificationQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::new(), next_id: 0, capacity: capacity.max(1) }
    }

    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        if self.items.len() == self.capacity {
            self.items.remove(0);
        }
        self.items.push((id, notification));
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|(item_id, _)| *item_id != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u64, Notification)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
