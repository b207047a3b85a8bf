//! Processing strategy module for command replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! covering CSV parsing, wallet application and output. Different
//! implementations (synchronous, asynchronous batch) are selected at runtime.

use crate::cli::{OutputKind, StrategyType};
use crate::core::WalletService;
use crate::io::csv_format::{write_balances_csv, write_history_csv};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay commands from the input file and write the resulting state
    ///
    /// Rejected or malformed commands are logged and skipped; only fatal
    /// errors are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - The async runtime cannot be created
    /// - Output cannot be written
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `output_kind` - What the strategy writes once all commands are applied
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    output_kind: OutputKind,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(output_kind)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, output_kind))
        }
    }
}

/// Write the wallet's final state in the requested form
pub(crate) fn write_output(
    wallet: &WalletService,
    output_kind: OutputKind,
    output: &mut dyn Write,
) -> Result<(), String> {
    match output_kind {
        OutputKind::Balances => write_balances_csv(&wallet.all_balances(), output),
        OutputKind::History => write_history_csv(&wallet.all_history(), output),
    }
}
