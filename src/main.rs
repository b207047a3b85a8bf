//! Point Wallet CLI
//!
//! Replays point charge/use commands from a CSV file against an in-memory
//! wallet and prints the resulting state.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > balances.csv
//! cargo run -- --strategy sync commands.csv > balances.csv
//! cargo run -- --output history commands.csv > history.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 commands.csv
//! RUST_LOG=debug cargo run -- commands.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success (rejected commands are logged, not fatal)
//! - 1: Error (missing arguments, file not found, output failure, etc.)

use point_wallet::{cli, logging, strategy};
use std::process;
use tracing::error;

fn main() {
    let args = cli::parse_args();

    logging::init_logging(&args.log_level);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, args.output)
    };

    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        error!(error = %e, "replay failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
