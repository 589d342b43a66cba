//! User-facing notifications.
//!
//! Notifications are fire-and-forget: the sender never learns whether or how
//! one was shown.

use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order. Used by tests and the CLI.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Keeps the most recent notification around for the status bar.
#[derive(Debug, Default)]
pub struct LatestNotification {
    latest: Option<Notification>,
}

impl LatestNotification {
    pub fn latest(&self) -> Option<&Notification> {
        self.latest.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.latest = None;
    }
}

impl Notifier for LatestNotification {
    fn notify(&mut self, notification: Notification) {
        info!(title = %notification.title, description = %notification.description, "notification");
        self.latest = Some(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_replaces_previous() {
        let mut sink = LatestNotification::default();
        sink.notify(Notification::new("Task added", "first"));
        sink.notify(Notification::new("Wallpaper Applied", "second"));
        assert_eq!(sink.latest().map(|n| n.title.as_str()), Some("Wallpaper Applied"));
        sink.dismiss();
        assert!(sink.latest().is_none());
    }
}
