//! Error types for the point wallet
//!
//! This module defines every rejection a balance mutation can produce.
//! None of them describe corruption: each one means the attempted
//! mutation was refused and no store was touched.
//!
//! # Error Categories
//!
//! - **Value Errors**: a Balance or TransactionRecord that would break its invariants
//! - **Rule Errors**: a charge or use refused by the transition rules

use super::balance::{Point, UserId};
use super::history::HistoryId;
use thiserror::Error;

/// Main error type for the wallet
///
/// Each variant carries enough context for an adapter to turn it into a
/// user-facing message or status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// A balance below zero was about to be constructed
    ///
    /// Unreachable through the transition rules; the Balance type refuses it anyway.
    #[error("Balance for user {user} cannot be negative: {point}")]
    NegativeBalance {
        /// User ID
        user: UserId,
        /// The rejected total
        point: Point,
    },

    /// Charge or use amount was below 1
    #[error("Amount must be at least 1, got {amount}")]
    AmountTooSmall {
        /// The rejected amount
        amount: Point,
    },

    /// Charge would push the balance above the maximum
    #[error("Charging {amount} for user {user} would exceed max balance {max} (current {current})")]
    LimitExceeded {
        /// User ID
        user: UserId,
        /// Balance before the charge
        current: Point,
        /// Requested charge
        amount: Point,
        /// The configured maximum
        max: Point,
    },

    /// Use would push the balance below zero
    #[error("Insufficient balance for user {user}: current {current}, requested {requested}")]
    InsufficientBalance {
        /// User ID
        user: UserId,
        /// Balance before the use
        current: Point,
        /// Requested use
        requested: Point,
    },

    /// A history record was built without a kind
    #[error("Transaction record {history_id} for user {user} has no transaction kind")]
    MissingTransactionKind {
        /// History ID of the rejected record
        history_id: HistoryId,
        /// User ID
        user: UserId,
    },
}

// Helper functions for creating common errors

impl WalletError {
    /// Create a NegativeBalance error
    pub fn negative_balance(user: UserId, point: Point) -> Self {
        WalletError::NegativeBalance { user, point }
    }

    /// Create an AmountTooSmall error
    pub fn amount_too_small(amount: Point) -> Self {
        WalletError::AmountTooSmall { amount }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(user: UserId, current: Point, amount: Point, max: Point) -> Self {
        WalletError::LimitExceeded {
            user,
            current,
            amount,
            max,
        }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(user: UserId, current: Point, requested: Point) -> Self {
        WalletError::InsufficientBalance {
            user,
            current,
            requested,
        }
    }

    /// Create a MissingTransactionKind error
    pub fn missing_transaction_kind(history_id: HistoryId, user: UserId) -> Self {
        WalletError::MissingTransactionKind { history_id, user }
    }
}
