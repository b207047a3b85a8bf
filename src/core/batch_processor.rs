//! Batch processing with user-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which applies batches of
//! wallet commands concurrently while keeping each user's commands in order.
//!
//! # Design
//!
//! A batch is partitioned by user ID. Each partition runs on its own
//! `spawn_blocking` task because wallet mutations block on the user's lock.
//! Partitions for different users therefore run in parallel, and a single
//! user's commands are applied sequentially in input order.
//!
//! Blocking tasks live outside the runtime's worker threads, so the number
//! of partitions running at once is bounded by a semaphore instead.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── WalletService  (shared stores and lock registry)
//!     └── Semaphore      (max_concurrent partitions in flight)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, error};

use super::balance_store::InMemoryBalanceStore;
use super::history_store::InMemoryHistoryStore;
use super::traits::{BalanceStore, HistoryStore};
use super::wallet::WalletService;
use crate::types::{Balance, UserId, WalletCommand, WalletError};

/// Result of applying a single command
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The command that was applied
    pub command: WalletCommand,

    /// The outcome (new balance or rejection)
    pub result: Result<Balance, WalletError>,
}

/// Batch processor with user-based partitioning
#[derive(Debug)]
pub struct BatchProcessor<B = InMemoryBalanceStore, H = InMemoryHistoryStore> {
    wallet: WalletService<B, H>,
    permits: Arc<Semaphore>,
}

impl<B, H> Clone for BatchProcessor<B, H> {
    fn clone(&self) -> Self {
        Self {
            wallet: self.wallet.clone(),
            permits: Arc::clone(&self.permits),
        }
    }
}

impl<B, H> BatchProcessor<B, H>
where
    B: BalanceStore + 'static,
    H: HistoryStore + 'static,
{
    /// Create a new BatchProcessor sharing `wallet`'s stores
    ///
    /// At most `max_concurrent` user partitions run at the same time. Zero
    /// is treated as one.
    pub fn new(wallet: WalletService<B, H>, max_concurrent: usize) -> Self {
        Self {
            wallet,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Partition a batch of commands by user ID
    ///
    /// # Guarantees
    ///
    /// - Each command appears in exactly one partition
    /// - Commands for each user keep their original order
    pub fn partition_by_user(
        &self,
        batch: Vec<WalletCommand>,
    ) -> HashMap<UserId, Vec<WalletCommand>> {
        let mut user_batches: HashMap<UserId, Vec<WalletCommand>> = HashMap::new();

        for command in batch {
            user_batches.entry(command.user).or_default().push(command);
        }

        user_batches
    }

    /// Apply all commands for a single user, in order
    ///
    /// Rejections are captured in the results and do not stop processing.
    pub fn process_user_commands(&self, commands: Vec<WalletCommand>) -> Vec<ProcessingResult> {
        commands
            .into_iter()
            .map(|command| {
                let result = self.wallet.apply(&command);
                ProcessingResult { command, result }
            })
            .collect()
    }

    /// Apply a batch with one blocking task per user
    ///
    /// Results are grouped by user; the order across users is unspecified.
    pub async fn process_batch(&self, batch: Vec<WalletCommand>) -> Vec<ProcessingResult> {
        let user_batches = self.partition_by_user(batch);
        debug!(users = user_batches.len(), "processing batch");

        let mut tasks = Vec::with_capacity(user_batches.len());
        for (user, commands) in user_batches {
            let permit = match Arc::clone(&self.permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(user, error = %e, "partition permits closed");
                    break;
                }
            };
            let processor = self.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                let _permit = permit;
                processor.process_user_commands(commands)
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(user_results) => results.extend(user_results),
                Err(e) => error!(error = %e, "user partition task failed"),
            }
        }

        results
    }
}
