//! # Notification Hub
//!
//! In-memory inboxes for users with an open session. Delivery is
//! fire-and-forget: a message for a user without an inbox is dropped.

use std::collections::HashMap;

use chrono::Utc;
use studio_core::models::{
    notification::Notification,
    user::{User, UserRole},
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug)]
struct Inbox {
    role: UserRole,
    items: Vec<Notification>,
}

#[derive(Debug, Default)]
pub struct NotificationHub {
    inboxes: RwLock<HashMap<Uuid, Inbox>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the user's inbox at login. Students start from an empty inbox.
    pub async fn activate(&self, user: &User) {
        let mut inboxes = self.inboxes.write().await;
        let inbox = inboxes.entry(user.id).or_insert_with(|| Inbox {
            role: user.role,
            items: Vec::new(),
        });
        if user.is_student() {
            inbox.items.clear();
        }
    }

    pub async fn deactivate(&self, user_id: Uuid) {
        self.inboxes.write().await.remove(&user_id);
    }

    /// Returns whether the message was delivered.
    pub async fn notify(&self, user_id: Uuid, message: &str) -> bool {
        let mut inboxes = self.inboxes.write().await;
        match inboxes.get_mut(&user_id) {
            Some(inbox) => {
                inbox.items.push(Notification::new(user_id, message, Utc::now()));
                true
            }
            None => {
                debug!(user_id = %user_id, "No active session, dropping notification");
                false
            }
        }
    }

    /// Delivers to every student with an open inbox. Returns how many received it.
    pub async fn notify_students(&self, message: &str) -> usize {
        let now = Utc::now();
        let mut inboxes = self.inboxes.write().await;
        let mut delivered = 0;
        for (user_id, inbox) in inboxes.iter_mut() {
            if inbox.role == UserRole::Student {
                inbox.items.push(Notification::new(*user_id, message, now));
                delivered += 1;
            }
        }
        delivered
    }

    /// Newest first.
    pub async fn list(&self, user_id: Uuid) -> Vec<Notification> {
        let inboxes = self.inboxes.read().await;
        let mut items = inboxes
            .get(&user_id)
            .map(|inbox| inbox.items.clone())
            .unwrap_or_default();
        items.reverse();
        items
    }

    pub async fn dismiss(&self, user_id: Uuid, notification_id: Uuid) -> bool {
        let mut inboxes = self.inboxes.write().await;
        let Some(inbox) = inboxes.get_mut(&user_id) else {
            return false;
        };
        let before = inbox.items.len();
        inbox.items.retain(|n| n.id != notification_id);
        inbox.items.len() != before
    }
}
