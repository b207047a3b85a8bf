//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Commands are read in batches and each batch is
//! applied with user-based partitioning, so different users are processed in
//! parallel through one shared `WalletService`.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (user partitioning + bounded spawn_blocking)
//!         └── WalletService (per-user locks, shared stores)
//! ```
//!
//! Batches are processed one after another, which keeps each user's commands
//! in file order even when they span several batches.

use crate::cli::OutputKind;
use crate::core::{BatchProcessor, WalletService};
use crate::io::async_reader::AsyncReader;
use crate::strategy::{write_output, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

const DEFAULT_BATCH_SIZE: usize = 1000;

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Runtime worker threads, and the most user partitions applied at once
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = default.batch_size,
                "invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    output_kind: OutputKind,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, output_kind: OutputKind) -> Self {
        Self {
            config,
            output_kind,
        }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let wallet = WalletService::in_memory();
        let processor = BatchProcessor::new(wallet.clone(), self.config.max_concurrent_batches);

        runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // csv-async reads from futures::io, tokio files need the compat layer
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut applied = 0usize;
            let mut rejected = 0usize;
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                for result in processor.process_batch(batch).await {
                    match result.result {
                        Ok(_) => applied += 1,
                        Err(e) => {
                            rejected += 1;
                            warn!(
                                user = result.command.user,
                                kind = %result.command.kind,
                                error = %e,
                                "command rejected"
                            );
                        }
                    }
                }
            }

            info!(applied, rejected, "replay finished");
            Ok::<(), String>(())
        })?;

        write_output(&wallet, self.output_kind, output)
    }
}
