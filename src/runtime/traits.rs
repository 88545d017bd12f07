//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the runtime with mock implementations and
//! swapping the session backend without touching the state machine.

use crate::session::{Session, SessionError};
use crate::state_machine::OrderState;
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for per-user order sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Return the user's session, creating one at step 1 if absent
    async fn get_or_create(&self, user_id: &str) -> Session;

    /// Look up a session without creating it
    async fn get(&self, user_id: &str) -> Option<Session>;

    /// Replace the session's state
    async fn update(&self, user_id: &str, state: OrderState) -> Result<Session, SessionError>;

    /// Remove the session. Returns whether one existed.
    async fn delete(&self, user_id: &str) -> bool;

    /// Number of orders in progress
    async fn len(&self) -> usize;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn get_or_create(&self, user_id: &str) -> Session {
        (**self).get_or_create(user_id).await
    }

    async fn get(&self, user_id: &str) -> Option<Session> {
        (**self).get(user_id).await
    }

    async fn update(&self, user_id: &str, state: OrderState) -> Result<Session, SessionError> {
        (**self).update(user_id, state).await
    }

    async fn delete(&self, user_id: &str) -> bool {
        (**self).delete(user_id).await
    }

    async fn len(&self) -> usize {
        (**self).len().await
    }
}
