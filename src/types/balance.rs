//! Balance-related types for the point wallet
//!
//! This module defines the Balance value and the identifiers shared
//! by the stores and the wallet service.

use super::error::WalletError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// User identifier
pub type UserId = u64;

/// Point amount
///
/// Signed so that rejected inputs (zero or negative amounts) can still be
/// expressed and reported by the transition rules.
pub type Point = i64;

/// Upper bound for any stored balance
pub const MAX_POINT: Point = 100_000;

/// A user's current point total
///
/// Balances are immutable values: every charge or use produces a new
/// `Balance` rather than mutating a shared instance. The constructor
/// refuses negative totals, so a `Balance` in hand is always `>= 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    user_id: UserId,
    point: Point,
    updated_at: DateTime<Utc>,
}

impl Balance {
    /// Create a balance record
    ///
    /// # Returns
    ///
    /// * `Ok(Balance)` if `point` is non-negative
    /// * `Err(WalletError::NegativeBalance)` otherwise
    pub fn new(
        user_id: UserId,
        point: Point,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, WalletError> {
        if point < 0 {
            return Err(WalletError::negative_balance(user_id, point));
        }

        Ok(Self {
            user_id,
            point,
            updated_at,
        })
    }

    /// Zero balance stamped with the current time
    ///
    /// Used for users that have never been charged.
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            point: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
