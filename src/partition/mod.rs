//! Partition prefix module
//!
//! Rewrites each record's object-storage prefix from a date-like field in
//! its payload.
//!
//! # Overview
//!
//! Objects delivered from a record land under `manifests/<date>/`. The date
//! is taken verbatim from the payload; no date parsing happens, so whatever
//! the producer wrote ends up in the prefix. Records whose payload cannot be
//! decoded pass through with their prefix untouched.

mod deriver;
mod types;

pub use deriver::PartitionKeyDeriver;
pub use types::{PartitionConfig, DEFAULT_DATE_FIELD, DEFAULT_FALLBACK_DATE, DEFAULT_PREFIX_ROOT};

#[cfg(test)]
mod tests;
