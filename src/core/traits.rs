//! Core traits for balance and history storage
//!
//! This module defines the storage seams the wallet service is generic over.
//! The crate ships DashMap-backed in-memory implementations; tests plug in
//! instrumented ones to observe locking behaviour.

use crate::types::{Balance, Point, TransactionKind, TransactionRecord, UserId, WalletError};
use chrono::{DateTime, Utc};

/// Trait for storing one current balance per user
///
/// Implementations must be safe for concurrent calls on different users.
/// Same-user serialization is the wallet service's job, not the store's.
pub trait BalanceStore: Send + Sync {
    /// Get the stored balance, if the user has one
    fn find(&self, user_id: UserId) -> Option<Balance>;

    /// Get the stored balance, or a zero balance if the user has none yet
    ///
    /// Never creates a stored record.
    fn read(&self, user_id: UserId) -> Balance {
        self.find(user_id).unwrap_or_else(|| Balance::empty(user_id))
    }

    /// Replace the stored balance with `{user_id, point, now}` and return it
    ///
    /// Fails only if `point` cannot form a valid Balance.
    fn write(&self, user_id: UserId, point: Point) -> Result<Balance, WalletError>;

    /// Put back what `find` returned before a write
    ///
    /// `None` removes the user's record entirely.
    fn restore(&self, user_id: UserId, previous: Option<Balance>);

    /// Get every stored balance
    fn all(&self) -> Vec<Balance>;
}

/// Trait for storing append-only transaction history
///
/// History ids must be unique and strictly increasing across all users,
/// including under concurrent appends for different users.
pub trait HistoryStore: Send + Sync {
    /// Append a record with the next history id and return it
    fn append(
        &self,
        user_id: UserId,
        amount: Point,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<TransactionRecord, WalletError>;

    /// Get all records for a user in insertion order
    fn read_all(&self, user_id: UserId) -> Vec<TransactionRecord>;

    /// Get every record, ordered by user then insertion order
    fn all(&self) -> Vec<TransactionRecord>;
}
