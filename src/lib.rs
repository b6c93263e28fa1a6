// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # firehose-transform
//!
//! Record transformation stage for delivery streams.
//!
//! Two independent components, each invoked once per batch:
//!
//! - **Partition prefixes**: [`PartitionKeyDeriver`] reads a date field from
//!   each record's payload and rewrites the record's object-storage prefix to
//!   `manifests/<date>/`.
//! - **Table routing**: [`TableRouter`] maps the batch's stream identifier to
//!   a table and submits one `INSERT` per record to an [`ExecutionEngine`],
//!   stopping at the first failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use firehose_transform::{DryRunEngine, FirehoseBatch, RouterConfig, TableRouter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let batch: FirehoseBatch = serde_json::from_str(BATCH_JSON).unwrap();
//!     let router = TableRouter::new(Arc::new(DryRunEngine::new()), RouterConfig::default());
//!
//!     let outcome = router.process_batch(&batch).await;
//!     assert!(outcome.is_success());
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────────────┐
//! │     PartitionKeyDeriver      │   │             TableRouter              │
//! │ decode → date → prefix       │   │ stream → table   decode → INSERT     │
//! └──────────────┬───────────────┘   └──────────────────┬───────────────────┘
//!                │                                      │
//!        ┌───────┴───────┐         ┌────────────┬───────┴──────┬────────────┐
//!        │    decode     │         │  routing   │  statement   │  database  │
//!        │ base64 / JSON │         │ suffix map │ literal/$n   │ DuckDB/dry │
//!        └───────────────┘         └────────────┴──────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Batch and record types
pub mod types;

/// Payload decoders
pub mod decode;

/// Partition prefix derivation
pub mod partition;

/// Stream → table routing table
pub mod routing;

/// Insert statement building
pub mod statement;

/// Execution engines
pub mod database;

/// Table router
pub mod router;

/// Configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::TransformConfig;
pub use database::{DryRunEngine, DuckDbEngine, ExecutionEngine, Target};
pub use decode::{Payload, PayloadEncoding};
pub use partition::{PartitionConfig, PartitionKeyDeriver};
pub use router::{BatchOutcome, BatchStatus, RouterConfig, TableRouter};
pub use routing::{extract_table_name, StreamKind, UnknownStreamPolicy, UNKNOWN_TABLE};
pub use statement::{build_statement, Statement, StatementBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
