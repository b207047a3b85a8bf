//! CSV format handling for wallet commands and output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to wallet commands
//! - Balance and history output serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{Balance, Point, TransactionKind, TransactionRecord, UserId, WalletCommand};
use serde::Deserialize;
use std::io::Write;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, user, amount.
/// The amount is kept as a string so a malformed value is reported
/// with the row instead of failing the whole deserializer.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub user: UserId,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a WalletCommand
///
/// Only the shape is checked here. Amounts below 1 are passed through so the
/// wallet rejects them with its own error.
///
/// # Returns
///
/// * `Ok(WalletCommand)` - Successfully converted record
/// * `Err(String)` - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<WalletCommand, String> {
    let kind = match csv_record.kind.to_lowercase().as_str() {
        "charge" => TransactionKind::Charge,
        "use" => TransactionKind::Use,
        _ => {
            return Err(format!(
                "Invalid command type: '{}' for user {}",
                csv_record.kind, csv_record.user
            ))
        }
    };

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => amount_str
            .trim()
            .parse::<Point>()
            .map_err(|_| format!("Invalid amount '{}' for user {}", amount_str, csv_record.user))?,
        _ => {
            return Err(format!(
                "{} command for user {} requires an amount",
                kind, csv_record.user
            ))
        }
    };

    Ok(WalletCommand {
        kind,
        user: csv_record.user,
        amount,
    })
}

/// Write balances to CSV format
///
/// Columns: user, point. Rows are sorted by user ID for deterministic output.
pub fn write_balances_csv(balances: &[Balance], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["user", "point"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = balances.to_vec();
    sorted.sort_by_key(Balance::user_id);

    for balance in sorted {
        writer
            .write_record(&[balance.user_id().to_string(), balance.point().to_string()])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

/// Write history records to CSV format
///
/// Columns: id, user, type, amount. Rows are sorted by user, then by
/// history id, which is each user's commit order.
pub fn write_history_csv(
    records: &[TransactionRecord],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["id", "user", "type", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| (record.user_id(), record.history_id()));

    for record in sorted {
        writer
            .write_record(&[
                record.history_id().to_string(),
                record.user_id().to_string(),
                record.kind().to_string(),
                record.amount().to_string(),
            ])
            .map_err(|e| format!("Failed to write history record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
