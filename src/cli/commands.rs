//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Delivery-stream record transformation CLI
#[derive(Parser, Debug)]
#[command(name = "firehose-transform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite destination prefixes from payload dates
    Partition {
        /// Batch file (JSON), `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Build and submit one insert per record
    Route {
        /// Batch file (JSON), `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// DuckDB database file (overrides config)
        #[arg(long)]
        database: Option<String>,

        /// Log statements instead of executing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve a stream identifier to its destination table
    TableName {
        /// Stream identifier (ARN or name)
        stream: String,
    },

    /// List the routing table
    Routes,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// DuckDB database file (overrides config)
        #[arg(long)]
        database: Option<String>,

        /// Log statements instead of executing them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
