//! Decoder implementations
//!
//! Each decoder handles a specific transport encoding.

use super::types::{Payload, PayloadDecoder, PayloadEncoding};
use crate::error::{Error, Result};
use crate::types::FirehoseRecord;
use base64::Engine as _;

/// Build the decoder for an encoding
pub fn decoder_for(encoding: PayloadEncoding) -> Box<dyn PayloadDecoder> {
    match encoding {
        PayloadEncoding::Auto => Box::new(AutoDecoder),
        PayloadEncoding::Base64 => Box::new(Base64JsonDecoder),
        PayloadEncoding::Plain => Box::new(PlainJsonDecoder),
    }
}

// ============================================================================
// Base64 JSON Decoder
// ============================================================================

/// Base64-encoded JSON object, the delivery stream's transport format
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonDecoder;

impl Base64JsonDecoder {
    /// Create a new base64 decoder
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDecoder for Base64JsonDecoder {
    fn decode(&self, record: &FirehoseRecord) -> Result<Payload> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(record.data.trim())
            .map_err(|e| Error::decode(&record.record_id, format!("invalid base64: {e}")))?;

        let text = String::from_utf8(bytes)
            .map_err(|e| Error::decode(&record.record_id, format!("invalid UTF-8: {e}")))?;

        Payload::parse(&text).map_err(|e| Error::decode(&record.record_id, e.to_string()))
    }

    fn encoding(&self) -> PayloadEncoding {
        PayloadEncoding::Base64
    }
}

// ============================================================================
// Plain JSON Decoder
// ============================================================================

/// Raw JSON object text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainJsonDecoder;

impl PlainJsonDecoder {
    /// Create a new plain JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDecoder for PlainJsonDecoder {
    fn decode(&self, record: &FirehoseRecord) -> Result<Payload> {
        Payload::parse(&record.data).map_err(|e| Error::decode(&record.record_id, e.to_string()))
    }

    fn encoding(&self) -> PayloadEncoding {
        PayloadEncoding::Plain
    }
}

// ============================================================================
// Auto Decoder
// ============================================================================

/// Tries base64 first, then raw JSON text
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecoder;

impl AutoDecoder {
    /// Create a new auto-detecting decoder
    pub fn new() -> Self {
        Self
    }
}

impl PayloadDecoder for AutoDecoder {
    fn decode(&self, record: &FirehoseRecord) -> Result<Payload> {
        match Base64JsonDecoder.decode(record) {
            Ok(payload) => Ok(payload),
            Err(base64_err) => PlainJsonDecoder.decode(record).map_err(|plain_err| {
                Error::decode(
                    &record.record_id,
                    format!("not base64 JSON ({base64_err}) nor JSON text ({plain_err})"),
                )
            }),
        }
    }

    fn encoding(&self) -> PayloadEncoding {
        PayloadEncoding::Auto
    }
}
