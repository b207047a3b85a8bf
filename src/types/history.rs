//! History-related types for the point wallet
//!
//! This module defines the transaction kinds, the immutable history
//! records appended after every committed mutation, and the command
//! shape the adapters feed into the wallet.

use super::balance::{Point, UserId};
use super::error::WalletError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// History record identifier
///
/// Assigned from a single global sequence starting at 1.
pub type HistoryId = u64;

/// Kind of balance mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Increase a balance, bounded above by `MAX_POINT`
    Charge,

    /// Decrease a balance, bounded below by zero
    Use,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Charge => f.write_str("CHARGE"),
            TransactionKind::Use => f.write_str("USE"),
        }
    }
}

/// One completed charge or use
///
/// Records are immutable once created. `amount` holds the delta that was
/// charged or used, never the resulting balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    history_id: HistoryId,
    user_id: UserId,
    amount: Point,
    kind: TransactionKind,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a history record
    ///
    /// `kind` is optional at this boundary so that records rebuilt from
    /// untyped input are rejected here instead of being stored without one.
    ///
    /// # Returns
    ///
    /// * `Ok(TransactionRecord)` for a positive amount with a kind
    /// * `Err(WalletError::AmountTooSmall)` when `amount < 1`
    /// * `Err(WalletError::MissingTransactionKind)` when `kind` is `None`
    pub fn new(
        history_id: HistoryId,
        user_id: UserId,
        amount: Point,
        kind: Option<TransactionKind>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, WalletError> {
        if amount < 1 {
            return Err(WalletError::amount_too_small(amount));
        }

        let kind = kind.ok_or_else(|| WalletError::missing_transaction_kind(history_id, user_id))?;

        Ok(Self {
            history_id,
            user_id,
            amount,
            kind,
            timestamp,
        })
    }

    pub fn history_id(&self) -> HistoryId {
        self.history_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn amount(&self) -> Point {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A requested mutation, as produced by an adapter
///
/// The amount is not validated here; the transition rules do that while
/// the user's lock is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCommand {
    /// Which mutation to apply
    pub kind: TransactionKind,

    /// The user whose balance is mutated
    pub user: UserId,

    /// Requested delta
    pub amount: Point,
}
