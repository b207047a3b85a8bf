//! Core business logic module
//!
//! This module contains the wallet components:
//! - `traits` - Storage seams the wallet service is generic over
//! - `balance_store` - Current balance per user
//! - `history_store` - Append-only transaction history per user
//! - `lock_registry` - One mutex per user, created on demand
//! - `rules` - Pure charge/use transition rules
//! - `wallet` - Orchestration of the four wallet operations
//! - `batch_processor` - Concurrent application of command batches

pub mod balance_store;
pub mod batch_processor;
pub mod history_store;
pub mod lock_registry;
pub mod rules;
pub mod traits;
pub mod wallet;

pub use balance_store::InMemoryBalanceStore;
pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use history_store::InMemoryHistoryStore;
pub use lock_registry::{LockRegistry, UserLock};
pub use traits::{BalanceStore, HistoryStore};
pub use wallet::WalletService;
