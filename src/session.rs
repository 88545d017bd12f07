//! Per-user order sessions
//!
//! A session exists only while the user has an order in progress. The
//! in-memory store keeps sessions for the life of the process unless a TTL
//! is configured.

use crate::runtime::SessionStore;
use crate::state_machine::OrderState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("No session for user {0}")]
    NotFound(String),
}

/// A user's order in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub state: OrderState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            state: OrderState::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn step(&self) -> u8 {
        self.state.step()
    }

    #[allow(dead_code)] // Used by tests
    pub fn category(&self) -> Option<&str> {
        self.state.category()
    }

    #[allow(dead_code)] // Used by tests
    pub fn item(&self) -> Option<&str> {
        self.state.item()
    }

    #[allow(dead_code)] // Used by tests
    pub fn quantity(&self) -> Option<&str> {
        self.state.quantity()
    }

    fn is_expired(&self, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
        let Some(ttl) = ttl else {
            return false;
        };
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return false;
        };
        now - self.updated_at >= ttl
    }
}

/// Session store backed by a process-local map
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions idle for longer than `ttl` are treated as gone
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl, now));
        before - sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    /// Returns the live session with its idle clock restarted, or a fresh one
    async fn get_or_create(&self, user_id: &str) -> Session {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        if let Some(existing) = sessions.get_mut(user_id) {
            if !existing.is_expired(self.ttl, now) {
                existing.updated_at = now;
                return existing.clone();
            }
            tracing::info!(
                user_id = %user_id,
                step = existing.step(),
                "Session expired, starting over"
            );
        }

        let session = Session::new(user_id);
        sessions.insert(user_id.to_string(), session.clone());
        session
    }

    async fn get(&self, user_id: &str) -> Option<Session> {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .get(user_id)
            .filter(|s| !s.is_expired(self.ttl, now))
            .cloned()
    }

    /// Expiry is not checked here: callers update a session they read under
    /// the user lock, and only a purge or delete can remove it meanwhile.
    async fn update(&self, user_id: &str, state: OrderState) -> Result<Session, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(user_id)
            .ok_or_else(|| SessionError::NotFound(user_id.to_string()))?;

        session.state = state;
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    async fn delete(&self, user_id: &str) -> bool {
        self.sessions.write().await.remove(user_id).is_some()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
