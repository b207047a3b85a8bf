use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay point charge/use commands against an in-memory wallet
#[derive(Parser, Debug)]
#[command(name = "point-wallet")]
#[command(about = "Replay point charge/use commands against an in-memory wallet")]
#[command(long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing commands
    #[arg(value_name = "INPUT", help = "Path to the input CSV file (type,user,amount)")]
    pub input_file: PathBuf,

    /// Processing strategy to use for replaying commands
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for one thread or 'async' for per-user parallelism"
    )]
    pub strategy: StrategyType,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads and concurrently applied user partitions (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Most user partitions applied at once (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// What to write to stdout once all commands are applied
    #[arg(
        long = "output",
        value_name = "OUTPUT",
        default_value = "balances",
        help = "Output: 'balances' (user,point) or 'history' (id,user,type,amount)"
    )]
    pub output: OutputKind,

    /// Default log filter, overridden by RUST_LOG
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level written to stderr (overridden by RUST_LOG)"
    )]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Available output forms
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputKind {
    Balances,
    History,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
