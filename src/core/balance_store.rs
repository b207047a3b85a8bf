//! Thread-safe balance storage
//!
//! This module provides the `InMemoryBalanceStore` struct, which keeps one
//! current balance per user in a `DashMap`.
//!
//! # Design
//!
//! DashMap shards its internal locks, so reads and writes for different users
//! proceed concurrently. The store performs no validation beyond what the
//! `Balance` constructor enforces; callers holding the user's lock decide
//! whether a write is allowed.
//!
//! # Volatility
//!
//! The store is in-memory only. Nothing survives the process.

use super::traits::BalanceStore;
use crate::types::{Balance, Point, UserId, WalletError};
use chrono::Utc;
use dashmap::DashMap;

/// In-memory balance store
#[derive(Debug)]
pub struct InMemoryBalanceStore {
    /// Current balance by user ID
    balances: DashMap<UserId, Balance>,
}

impl InMemoryBalanceStore {
    /// Create a new empty InMemoryBalanceStore
    pub fn new() -> Self {
        Self {
            balances: DashMap::new(),
        }
    }

    /// Number of users with a stored balance
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl Default for InMemoryBalanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceStore for InMemoryBalanceStore {
    fn find(&self, user_id: UserId) -> Option<Balance> {
        self.balances
            .get(&user_id)
            .map(|entry| entry.value().clone())
    }

    fn write(&self, user_id: UserId, point: Point) -> Result<Balance, WalletError> {
        let balance = Balance::new(user_id, point, Utc::now())?;
        self.balances.insert(user_id, balance.clone());
        Ok(balance)
    }

    fn restore(&self, user_id: UserId, previous: Option<Balance>) {
        match previous {
            Some(balance) => {
                self.balances.insert(user_id, balance);
            }
            None => {
                self.balances.remove(&user_id);
            }
        }
    }

    fn all(&self) -> Vec<Balance> {
        self.balances
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }
}
