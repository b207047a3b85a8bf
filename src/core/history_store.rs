//! Thread-safe append-only transaction history
//!
//! This module provides the `InMemoryHistoryStore` struct, which keeps an
//! insertion-ordered list of transaction records per user.
//!
//! # Design
//!
//! Records live in a `DashMap<UserId, Vec<TransactionRecord>>`. History ids
//! come from one `AtomicU64` shared by all users, so two users appending at
//! the same time never receive the same id. The id is drawn while the
//! user's entry is held, which keeps each user's list sorted by id even if
//! callers append for the same user without any outer lock.

use super::traits::HistoryStore;
use crate::types::{HistoryId, Point, TransactionKind, TransactionRecord, UserId, WalletError};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// First id handed out by a fresh store
const FIRST_HISTORY_ID: HistoryId = 1;

/// In-memory transaction history
#[derive(Debug)]
pub struct InMemoryHistoryStore {
    /// Records by user ID, in insertion order
    records: DashMap<UserId, Vec<TransactionRecord>>,

    /// Next history id, global across users
    next_id: AtomicU64,
}

impl InMemoryHistoryStore {
    /// Create a new empty InMemoryHistoryStore
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicU64::new(FIRST_HISTORY_ID),
        }
    }

    /// Total number of records across all users
    pub fn len(&self) -> usize {
        self.records.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(
        &self,
        user_id: UserId,
        amount: Point,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord, WalletError> {
        // Reject before drawing an id so failed appends leave no gap
        if amount < 1 {
            return Err(WalletError::amount_too_small(amount));
        }

        let mut entry = self.records.entry(user_id).or_insert_with(Vec::new);
        let history_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = TransactionRecord::new(history_id, user_id, amount, Some(kind), timestamp)?;
        entry.value_mut().push(record.clone());

        Ok(record)
    }

    fn read_all(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.records
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    fn all(&self) -> Vec<TransactionRecord> {
        let mut records: Vec<TransactionRecord> = self
            .records
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| (record.user_id(), record.history_id()));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_read_all_unknown_user_is_empty() {
        let store = InMemoryHistoryStore::new();

        assert!(store.read_all(1).is_empty());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();

        store.append(1, 100, TransactionKind::Charge, now).unwrap();
        store.append(1, 200, TransactionKind::Charge, now).unwrap();
        store.append(1, 50, TransactionKind::Use, now).unwrap();

        let history: Vec<(Point, TransactionKind)> = store
            .read_all(1)
            .iter()
            .map(|record| (record.amount(), record.kind()))
            .collect();

        assert_eq!(
            history,
            vec![
                (100, TransactionKind::Charge),
                (200, TransactionKind::Charge),
                (50, TransactionKind::Use),
            ]
        );
    }

    #[test]
    fn test_ids_start_at_one_and_are_global() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();

        let first = store.append(1, 10, TransactionKind::Charge, now).unwrap();
        let second = store.append(2, 10, TransactionKind::Charge, now).unwrap();
        let third = store.append(1, 5, TransactionKind::Use, now).unwrap();

        assert_eq!(first.history_id(), 1);
        assert_eq!(second.history_id(), 2);
        assert_eq!(third.history_id(), 3);
    }

    #[test]
    fn test_append_rejects_amount_below_one() {
        let store = InMemoryHistoryStore::new();

        let result = store.append(1, 0, TransactionKind::Charge, Utc::now());

        assert_eq!(result, Err(WalletError::amount_too_small(0)));
        assert!(store.is_empty());

        let record = store
            .append(1, 1, TransactionKind::Charge, Utc::now())
            .unwrap();
        assert_eq!(record.history_id(), FIRST_HISTORY_ID);
    }

    #[test]
    fn test_all_orders_by_user_then_insertion() {
        let store = InMemoryHistoryStore::new();
        let now = Utc::now();

        store.append(2, 1, TransactionKind::Charge, now).unwrap();
        store.append(1, 2, TransactionKind::Charge, now).unwrap();
        store.append(2, 3, TransactionKind::Charge, now).unwrap();

        let amounts: Vec<(UserId, Point)> = store
            .all()
            .iter()
            .map(|record| (record.user_id(), record.amount()))
            .collect();

        assert_eq!(amounts, vec![(1, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_concurrent_appends_assign_unique_ids() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut handles = vec![];

        for user in 0..8u64 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..250 {
                    store
                        .append(user, 1, TransactionKind::Charge, Utc::now())
                        .unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let ids: HashSet<HistoryId> = store.all().iter().map(|r| r.history_id()).collect();
        assert_eq!(store.len(), 2_000);
        assert_eq!(ids.len(), 2_000);
        assert_eq!(ids.iter().min(), Some(&1));
        assert_eq!(ids.iter().max(), Some(&2_000));
    }

    #[test]
    fn test_concurrent_same_user_appends_stay_sorted_by_id() {
        let store = Arc::new(InMemoryHistoryStore::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    store
                        .append(1, 1, TransactionKind::Charge, Utc::now())
                        .unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<HistoryId> = store.read_all(1).iter().map(|r| r.history_id()).collect();
        assert_eq!(ids.len(), 400);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
