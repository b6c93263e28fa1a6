//! Payload decoder module
//!
//! Supports: base64-encoded JSON, raw JSON text, and auto-detection
//!
//! # Overview
//!
//! Delivery streams hand records over with an encoded `data` attribute.
//! Decoders turn that attribute into a flat, ordered [`Payload`] of
//! field → scalar pairs.

mod decoders;
mod types;

pub use decoders::{decoder_for, AutoDecoder, Base64JsonDecoder, PlainJsonDecoder};
pub use types::{scalar_text, Payload, PayloadDecoder, PayloadEncoding};

#[cfg(test)]
mod tests;
