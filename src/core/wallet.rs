//! Wallet service orchestration
//!
//! This module provides the `WalletService` struct, which coordinates the
//! balance store, the history store and the lock registry to serve the four
//! wallet operations.
//!
//! # Architecture
//!
//! ```text
//! WalletService
//!     ├── Arc<B: BalanceStore>  (current balance per user)
//!     ├── Arc<H: HistoryStore>  (append-only history per user)
//!     └── Arc<LockRegistry>     (one mutex per user)
//! ```
//!
//! # Mutation protocol
//!
//! `charge` and `use_points` run the same sequence while holding the user's
//! lock: read the balance, apply the transition rule, write the new balance,
//! append the history record. A rejected rule returns before any write. If
//! the append fails, the stored balance is put back exactly as it was (or
//! removed, for a user who had none) and the append error is returned. The
//! lock guard is dropped on every exit path, including a panic in a store.
//!
//! `get_balance` and `get_history` take no lock and may observe a mutation
//! for the same user that is in flight.
//!
//! # Thread Safety
//!
//! The service is cheap to clone and can be shared across threads. Calls for
//! different users never contend on a wallet lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use super::balance_store::InMemoryBalanceStore;
use super::history_store::InMemoryHistoryStore;
use super::lock_registry::LockRegistry;
use super::rules;
use super::traits::{BalanceStore, HistoryStore};
use crate::types::{
    Balance, Point, TransactionKind, TransactionRecord, UserId, WalletCommand, WalletError,
};

/// Point wallet service
///
/// Generic over its stores so alternative or instrumented implementations can
/// be injected; `WalletService::in_memory()` wires the default ones.
#[derive(Debug)]
pub struct WalletService<B = InMemoryBalanceStore, H = InMemoryHistoryStore> {
    balances: Arc<B>,
    history: Arc<H>,
    locks: Arc<LockRegistry>,
}

impl<B, H> Clone for WalletService<B, H> {
    fn clone(&self) -> Self {
        Self {
            balances: Arc::clone(&self.balances),
            history: Arc::clone(&self.history),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl WalletService {
    /// Create a service backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryBalanceStore::new()),
            Arc::new(InMemoryHistoryStore::new()),
            Arc::new(LockRegistry::new()),
        )
    }
}

impl<B: BalanceStore, H: HistoryStore> WalletService<B, H> {
    /// Create a service from its collaborators
    pub fn new(balances: Arc<B>, history: Arc<H>, locks: Arc<LockRegistry>) -> Self {
        Self {
            balances,
            history,
            locks,
        }
    }

    /// Current balance for a user, zero if the user has never been charged
    pub fn get_balance(&self, user_id: UserId) -> Balance {
        self.balances.read(user_id)
    }

    /// Every history record for a user, in commit order
    pub fn get_history(&self, user_id: UserId) -> Vec<TransactionRecord> {
        self.history.read_all(user_id)
    }

    /// Increase a user's balance by `amount`
    ///
    /// Blocks while another charge or use for the same user is in progress.
    ///
    /// # Returns
    ///
    /// * `Ok(Balance)` - the new balance
    /// * `Err(WalletError::AmountTooSmall)` - if `amount < 1`
    /// * `Err(WalletError::LimitExceeded)` - if the balance would exceed the maximum
    pub fn charge(&self, user_id: UserId, amount: Point) -> Result<Balance, WalletError> {
        self.mutate(user_id, amount, TransactionKind::Charge)
    }

    /// Decrease a user's balance by `amount`
    ///
    /// Blocks while another charge or use for the same user is in progress.
    ///
    /// # Returns
    ///
    /// * `Ok(Balance)` - the new balance
    /// * `Err(WalletError::AmountTooSmall)` - if `amount < 1`
    /// * `Err(WalletError::InsufficientBalance)` - if the balance would drop below zero
    pub fn use_points(&self, user_id: UserId, amount: Point) -> Result<Balance, WalletError> {
        self.mutate(user_id, amount, TransactionKind::Use)
    }

    /// Apply a parsed command
    pub fn apply(&self, command: &WalletCommand) -> Result<Balance, WalletError> {
        self.mutate(command.user, command.amount, command.kind)
    }

    /// Snapshot of every stored balance
    pub fn all_balances(&self) -> Vec<Balance> {
        self.balances.all()
    }

    /// Snapshot of every history record, ordered by user then commit order
    pub fn all_history(&self) -> Vec<TransactionRecord> {
        self.history.all()
    }

    fn mutate(
        &self,
        user_id: UserId,
        amount: Point,
        kind: TransactionKind,
    ) -> Result<Balance, WalletError> {
        let lock = self.locks.acquire(user_id);
        let _guard = lock_user(&lock, user_id);

        let stored = self.balances.find(user_id);
        let current = stored.clone().unwrap_or_else(|| Balance::empty(user_id));
        let next = match kind {
            TransactionKind::Charge => rules::charge(&current, amount),
            TransactionKind::Use => rules::use_points(&current, amount),
        }
        .inspect_err(|e| debug!(user_id, amount, %kind, error = %e, "transition rejected"))?;

        let balance = self.balances.write(user_id, next)?;

        if let Err(e) = self
            .history
            .append(user_id, amount, kind, balance.updated_at())
        {
            // Keep balance and history in step
            warn!(
                user_id,
                amount,
                %kind,
                error = %e,
                "history append failed, restoring balance"
            );
            self.balances.restore(user_id, stored);
            return Err(e);
        }

        debug!(user_id, amount, %kind, point = balance.point(), "balance updated");
        Ok(balance)
    }
}

/// Lock a user's mutex, recovering it if a previous holder panicked
fn lock_user(lock: &Mutex<()>, user_id: UserId) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|poisoned: PoisonError<MutexGuard<'_, ()>>| {
        warn!(user_id, "recovering user lock poisoned by a panicked holder");
        lock.clear_poison();
        poisoned.into_inner()
    })
}
