//! Per-user lock registry
//!
//! This module provides the `LockRegistry` struct, which lazily creates and
//! caches one mutex per user ID.
//!
//! # Design
//!
//! Locks are kept in a `DashMap<UserId, UserLock>`. `acquire` goes through
//! `entry().or_insert_with()`, which holds the shard's write lock for the
//! whole look-up-or-insert, so two threads racing on a new user always end up
//! with the same mutex. Locks for different users are separate mutexes and
//! never block each other.
//!
//! Entries are never evicted: the map grows with the set of users ever seen.

use crate::types::UserId;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

/// Handle to the mutex guarding one user's balance and history
///
/// Compare handles with `Arc::ptr_eq`.
pub type UserLock = Arc<Mutex<()>>;

/// Registry of per-user locks
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<UserId, UserLock>,
}

impl LockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Get the lock for `user_id`, creating it on first use
    ///
    /// The same handle is returned for every call with the same user ID for
    /// the registry's lifetime.
    pub fn acquire(&self, user_id: UserId) -> UserLock {
        self.locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of users with a lock
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
