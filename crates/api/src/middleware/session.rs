//! # Session Registry
//!
//! Bearer tokens handed out at login, each mapped to the user it belongs to.
//! A user may hold several tokens at once (one per open client).

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: RwLock<HashMap<Uuid, Uuid>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh token for the user.
    pub async fn open(&self, user_id: Uuid) -> Uuid {
        let token = Uuid::new_v4();
        self.tokens.write().await.insert(token, user_id);
        token
    }

    pub async fn resolve(&self, token: Uuid) -> Option<Uuid> {
        self.tokens.read().await.get(&token).copied()
    }

    /// Drops one token, returning the user it belonged to.
    pub async fn close(&self, token: Uuid) -> Option<Uuid> {
        self.tokens.write().await.remove(&token)
    }

    /// Drops every token of the user. Returns how many were open.
    pub async fn close_user(&self, user_id: Uuid) -> usize {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, owner| *owner != user_id);
        before - tokens.len()
    }

    pub async fn is_active(&self, user_id: Uuid) -> bool {
        self.tokens.read().await.values().any(|owner| *owner == user_id)
    }
}
