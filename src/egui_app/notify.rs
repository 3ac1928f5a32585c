//! Toast notifications, the user-facing surface for errors and confirmations.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(5);

/// Severity of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A single on-screen notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    created: Instant,
}

impl Toast {
    fn expired(&self, ttl: Duration) -> bool {
        self.created.elapsed() >= ttl
    }
}

/// Thread-safe toast queue. Cloning shares the queue, so worker threads
/// can push results directly.
#[derive(Debug, Clone)]
pub struct Notifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: Arc::new(Mutex::new(Vec::new())),
            ttl: TOAST_TTL,
        }
    }

    fn push(&self, level: ToastLevel, message: impl Into<String>) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(Toast {
                level,
                message: message.into(),
                created: Instant::now(),
            });
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Currently visible toasts, pruning expired ones on the way.
    pub fn active(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => {
                let ttl = self.ttl;
                toasts.retain(|t| !t.expired(ttl));
                toasts.clone()
            }
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.clear();
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let notifier = Notifier::new();
        notifier.error("something broke");
        notifier.success("trip requested");

        let active = notifier.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].level, ToastLevel::Error);
        assert_eq!(active[1].message, "trip requested");
    }

    #[test]
    fn test_clone_shares_queue() {
        let notifier = Notifier::new();
        let clone = notifier.clone();
        clone.info("from a worker");
        assert_eq!(notifier.active().len(), 1);
    }

    #[test]
    fn test_expired_toasts_pruned() {
        let mut notifier = Notifier::new();
        notifier.ttl = Duration::ZERO;
        notifier.info("gone immediately");
        assert!(notifier.active().is_empty());
    }

    #[test]
    fn test_clear() {
        let notifier = Notifier::new();
        notifier.info("a");
        notifier.clear();
        assert!(notifier.active().is_empty());
    }
}
