//! Point Wallet Library
//! # Overview
//!
//! This library keeps a per-user point balance and an append-only history of
//! charge/use transactions. Mutations for one user are serialized by a
//! per-user lock while different users proceed fully in parallel.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Balance, TransactionRecord, WalletError)
//! - [`core`] - Business logic components:
//!   - [`core::balance_store`] - Current balance per user
//!   - [`core::history_store`] - Append-only history with global ids
//!   - [`core::lock_registry`] - Lazily created per-user locks
//!   - [`core::rules`] - Pure charge/use transition rules
//!   - [`core::wallet`] - Orchestration of the four wallet operations
//! - [`cli`], [`io`], [`strategy`] - CSV replay adapter around the wallet
//!
//! # Operations
//!
//! - **get_balance**: current balance, zero for unknown users (no locking)
//! - **charge**: increase a balance by at least 1, up to [`MAX_POINT`]
//! - **use_points**: decrease a balance by at least 1, never below zero
//! - **get_history**: all records of a user in commit order (no locking)
//!
//! ```
//! use point_wallet::{TransactionKind, WalletError, WalletService};
//!
//! let wallet = WalletService::in_memory();
//! wallet.charge(1, 1_000).unwrap();
//! wallet.use_points(1, 400).unwrap();
//!
//! assert_eq!(wallet.get_balance(1).point(), 600);
//! assert_eq!(wallet.get_history(1)[1].kind(), TransactionKind::Use);
//! assert!(matches!(
//!     wallet.use_points(1, 601),
//!     Err(WalletError::InsufficientBalance { .. })
//! ));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use crate::core::{
    BalanceStore, HistoryStore, InMemoryBalanceStore, InMemoryHistoryStore, LockRegistry,
    UserLock, WalletService,
};
pub use crate::types::{
    Balance, HistoryId, Point, TransactionKind, TransactionRecord, UserId, WalletCommand,
    WalletError, MAX_POINT,
};
