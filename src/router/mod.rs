//! Table router module
//!
//! Resolves a batch's destination table from its stream identifier, builds
//! one insert per record and submits it to an [`ExecutionEngine`].
//!
//! # Overview
//!
//! Records are submitted sequentially in batch order. The first failure
//! (undecodable payload, unsupported value, bad identifier, engine error)
//! stops the batch; statements already executed are not rolled back, and
//! nothing is retried here.
//!
//! [`ExecutionEngine`]: crate::database::ExecutionEngine

mod table_router;
mod types;

pub use table_router::TableRouter;
pub use types::{BatchOutcome, BatchStatus, FailureKind, RouterConfig};
