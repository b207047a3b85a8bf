//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It streams commands with `SyncReader` and applies
//! them one by one through a `WalletService` on the calling thread.

use crate::cli::OutputKind;
use crate::core::WalletService;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_output, ProcessingStrategy};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use point_wallet::cli::OutputKind;
/// use point_wallet::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(OutputKind::Balances);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("commands.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    output_kind: OutputKind,
}

impl SyncProcessingStrategy {
    pub fn new(output_kind: OutputKind) -> Self {
        Self { output_kind }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let wallet = WalletService::in_memory();
        let reader = SyncReader::new(input_path)?;

        let mut applied = 0usize;
        let mut rejected = 0usize;
        for result in reader {
            match result {
                Ok(command) => match wallet.apply(&command) {
                    Ok(_) => applied += 1,
                    Err(e) => {
                        rejected += 1;
                        warn!(
                            user = command.user,
                            kind = %command.kind,
                            error = %e,
                            "command rejected"
                        );
                    }
                },
                Err(e) => warn!(error = %e, "skipping record"),
            }
        }

        info!(applied, rejected, "replay finished");
        write_output(&wallet, self.output_kind, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str, output_kind: OutputKind) -> String {
        let file = create_temp_csv(content);
        let mut output = Vec::new();

        SyncProcessingStrategy::new(output_kind)
            .process(file.path(), &mut output)
            .unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_sync_strategy_writes_balances() {
        let output = run(
            "type,user,amount\ncharge,2,300\ncharge,1,100\nuse,2,50\n",
            OutputKind::Balances,
        );

        assert_eq!(output, "user,point\n1,100\n2,250\n");
    }

    #[test]
    fn test_sync_strategy_skips_rejected_commands() {
        let output = run(
            "type,user,amount\nuse,1,10\ncharge,1,0\ncharge,1,100001\ncharge,1,40\n",
            OutputKind::Balances,
        );

        assert_eq!(output, "user,point\n1,40\n");
    }

    #[test]
    fn test_sync_strategy_writes_history() {
        let output = run(
            "type,user,amount\ncharge,1,100\ncharge,1,200\nuse,1,50\nuse,1,1000\n",
            OutputKind::History,
        );

        assert_eq!(
            output,
            "id,user,type,amount\n1,1,CHARGE,100\n2,1,CHARGE,200\n3,1,USE,50\n"
        );
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy::new(OutputKind::Balances);
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert!(result.unwrap_err().contains("Failed to open file"));
    }
}
