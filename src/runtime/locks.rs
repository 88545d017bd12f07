//! Per-user mutual exclusion

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

type UserLock = Arc<tokio::sync::Mutex<()>>;

/// Async lock per user id
///
/// Entries are created on demand and removed once nobody holds or waits on
/// them, so the table only ever contains users with work in flight.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<String, UserLock>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `user_id`
    pub async fn acquire(&self, user_id: &str) -> UserGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(user_id.to_string()).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;

        UserGuard {
            owner: self,
            user_id: user_id.to_string(),
            lock,
            guard: Some(guard),
        }
    }

    /// Users currently holding or waiting on a lock
    #[allow(dead_code)] // Used by tests
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive access to one user, released on drop
pub struct UserGuard<'a> {
    owner: &'a UserLocks,
    user_id: String,
    lock: UserLock,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();

        // Clones are only made under the table mutex, so a count of two
        // (table + this guard) means no one else is waiting.
        let mut locks = self.owner.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn entries_are_dropped_after_use() {
        let locks = UserLocks::new();
        {
            let _guard = locks.acquire("111").await;
            assert_eq!(locks.len(), 1);
        }
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn same_user_is_serialized() {
        let locks = Arc::new(UserLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                tokio::spawn(async move {
                    let _guard = locks.acquire("111").await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn different_users_do_not_block() {
        let locks = UserLocks::new();
        let _first = locks.acquire("111").await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire("222")).await;
        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }
}
