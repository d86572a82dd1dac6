//! Transient notifications (toasts)

use chrono::{DateTime, Duration, Utc};

/// How long a toast stays up
pub const TOAST_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    /// Whether a message of this level goes away on its own
    pub fn auto_dismisses(&self) -> bool {
        matches!(self, Level::Success | Level::Info)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Level::Success => "Success",
            Level::Error => "Error",
            Level::Warning => "Warning",
            Level::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: Level,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Ordered toast queue
///
/// Every push is a separate toast, even when the text repeats.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, title: impl Into<String>, message: impl Into<String>) -> u64 {
        let toast = Toast {
            id: self.next_id,
            level,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
        };
        self.next_id += 1;

        match level {
            Level::Error => tracing::error!(title = %toast.title, "{}", toast.message),
            Level::Warning => tracing::warn!(title = %toast.title, "{}", toast.message),
            Level::Success | Level::Info => tracing::info!(title = %toast.title, "{}", toast.message),
        }

        let id = toast.id;
        self.items.push(toast);
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Success, Level::Success.title(), message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Error, Level::Error.title(), message)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Warning, Level::Warning.title(), message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Info, Level::Info.title(), message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Drop toasts older than the display time
    pub fn prune_expired(&mut self, now: DateTime<Utc>) {
        let ttl = Duration::seconds(TOAST_TTL_SECS);
        self.items.retain(|toast| now - toast.created_at < ttl);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take every pending toast, oldest first
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_messages_are_separate_toasts() {
        let mut toasts = Toasts::new();
        let first = toasts.error("Invalid credentials");
        let second = toasts.error("Invalid credentials");
        assert_ne!(first, second);
        assert_eq!(toasts.len(), 2);

        toasts.dismiss(first);
        assert_eq!(toasts.items()[0].id, second);
    }

    #[test]
    fn test_prune_and_drain() {
        let mut toasts = Toasts::new();
        toasts.info("Loaded");
        toasts.prune_expired(Utc::now());
        assert_eq!(toasts.len(), 1);

        toasts.prune_expired(Utc::now() + Duration::seconds(TOAST_TTL_SECS));
        assert!(toasts.is_empty());

        toasts.success("Saved");
        let drained = toasts.drain();
        assert_eq!(drained[0].level, Level::Success);
        assert!(toasts.is_empty());
    }
}
