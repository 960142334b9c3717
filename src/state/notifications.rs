#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use crate::net::types::{Notification, NotificationFeed};

/// Header notification dropdown state.
#[derive(Clone, Debug, Default)]
pub struct NotificationsState {
    pub items: Vec<Notification>,
    pub unread_count: u32,
    pub open: bool,
}

impl NotificationsState {
    /// Replace contents from a fetched feed.
    pub fn load(&mut self, feed: NotificationFeed) {
        self.items = feed.notifications;
        self.unread_count = feed.unread_count;
    }

    /// Mark one notification read locally. Returns the notification's
    /// navigation url when it was previously unread or known.
    pub fn mark_read(&mut self, id: i64) -> Option<String> {
        let item = self.items.iter_mut().find(|n| n.id == id)?;
        if !item.is_read {
            item.is_read = true;
            self.unread_count = self.unread_count.saturating_sub(1);
        }
        item.url.clone()
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }
}
