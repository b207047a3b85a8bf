//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over wallet commands from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<WalletCommand, String>`
//! for each CSV row:
//!
//! ```no_run
//! use point_wallet::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("commands.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(command) => println!("Applying command: {:?}", command),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::WalletCommand;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time; memory use does not grow with the file.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader trims whitespace from all fields and allows a missing
    /// trailing amount column, which is then reported per row.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<WalletCommand, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();
        let next = deserializer.next()?;

        // Line 1 is the header
        self.line_num += 1;
        let line = self.line_num + 1;

        Some(match next {
            Ok(csv_record) => {
                convert_csv_record(csv_record).map_err(|e| format!("Line {}: {}", line, e))
            }
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));

        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_commands_in_order() {
        let file = create_temp_csv("type,user,amount\ncharge,1,100\ncharge,1,200\nuse,1,50\n");

        let commands: Vec<WalletCommand> = SyncReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            commands,
            vec![
                WalletCommand {
                    kind: TransactionKind::Charge,
                    user: 1,
                    amount: 100,
                },
                WalletCommand {
                    kind: TransactionKind::Charge,
                    user: 1,
                    amount: 200,
                },
                WalletCommand {
                    kind: TransactionKind::Use,
                    user: 1,
                    amount: 50,
                },
            ]
        );
    }

    #[test]
    fn test_sync_reader_reports_line_numbers_and_continues() {
        let file = create_temp_csv(
            "type,user,amount\ncharge,1,100\ncharge,2,invalid\nrefund,3,5\nuse,1,10\n",
        );

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 4);
        assert!(records[0].is_ok());
        let error = records[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3"), "unexpected error: {}", error);
        assert!(error.contains("Invalid amount"));
        let error = records[2].as_ref().unwrap_err();
        assert!(error.contains("Line 4"), "unexpected error: {}", error);
        assert!(records[3].is_ok());
    }

    #[test]
    fn test_sync_reader_reports_unparseable_user() {
        let file = create_temp_csv("type,user,amount\ncharge,abc,100\ncharge,2,5\n");

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        assert!(records[0].as_ref().unwrap_err().contains("CSV parse error"));
        assert!(records[1].is_ok());
    }

    #[test]
    fn test_sync_reader_handles_whitespace_and_case() {
        let file = create_temp_csv("type,user,amount\n  CHARGE ,  7  ,  25  \n");

        let records: Vec<_> = SyncReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(
            records,
            vec![WalletCommand {
                kind: TransactionKind::Charge,
                user: 7,
                amount: 25,
            }]
        );
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv("type,user,amount\n");

        assert_eq!(SyncReader::new(file.path()).unwrap().count(), 0);
    }
}
