//! Statement execution support
//!
//! This module defines the execution-engine seam used by the table router,
//! with an embedded DuckDB engine and a dry-run engine that only logs.

mod dry_run;
mod engine;
mod types;

pub use dry_run::DryRunEngine;
pub use engine::DuckDbEngine;
pub use types::{ExecutionEngine, Target};
