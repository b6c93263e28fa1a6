//! Stream routing module
//!
//! Maps a delivery stream identifier to its destination table.
//!
//! # Overview
//!
//! The identifier is split on `/` and its last segment is looked up in a
//! fixed table of six known streams. Unknown suffixes resolve to the
//! [`UNKNOWN_TABLE`] sentinel; whether that sentinel may receive statements
//! is decided by the router's [`UnknownStreamPolicy`].

mod table;

pub use table::{
    extract_table_name, stream_suffix, RoutingTable, StreamKind, UnknownStreamPolicy,
    UNKNOWN_TABLE,
};

#[cfg(test)]
mod tests;
