//! CLI module
//!
//! Command-line interface for running the transformation stage.
//!
//! # Commands
//!
//! - `partition` - Rewrite destination prefixes of a batch
//! - `route` - Submit a batch's records as inserts
//! - `table-name` - Resolve a stream identifier to its table
//! - `routes` - List the routing table
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{build_engine, Runner};
pub use server::{app, serve, AppState};
