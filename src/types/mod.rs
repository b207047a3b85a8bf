//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `balance`: Per-user point balance and identifiers
//! - `history`: Transaction records and their kinds
//! - `error`: Error types for the wallet

pub mod balance;
pub mod error;
pub mod history;

pub use balance::{Balance, Point, UserId, MAX_POINT};
pub use error::WalletError;
pub use history::{HistoryId, TransactionKind, TransactionRecord, WalletCommand};
