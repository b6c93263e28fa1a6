//! Partition key deriver
//!
//! Computes `"<root>/" + date + "/"` for each record and writes it into the
//! record's destination configuration.

use super::types::PartitionConfig;
use crate::decode::{decoder_for, scalar_text, Payload, PayloadDecoder, PayloadEncoding};
use crate::types::{FirehoseBatch, FirehoseRecord};

/// Rewrites destination prefixes from payload dates
pub struct PartitionKeyDeriver {
    config: PartitionConfig,
    decoder: Box<dyn PayloadDecoder>,
}

impl Default for PartitionKeyDeriver {
    fn default() -> Self {
        Self::new(PartitionConfig::default())
    }
}

impl PartitionKeyDeriver {
    /// Create a deriver that auto-detects the payload encoding
    pub fn new(config: PartitionConfig) -> Self {
        Self::with_encoding(config, PayloadEncoding::Auto)
    }

    /// Create a deriver for a fixed payload encoding
    pub fn with_encoding(config: PartitionConfig, encoding: PayloadEncoding) -> Self {
        Self {
            config,
            decoder: decoder_for(encoding),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Derive the prefix for a decoded payload
    ///
    /// Null and missing dates both fall back to the configured literal.
    /// Nested values are not dates either and also fall back.
    pub fn derive_prefix(&self, payload: &Payload) -> String {
        let date = payload
            .get(&self.config.date_field)
            .and_then(scalar_text)
            .unwrap_or_else(|| self.config.fallback_date.clone());

        self.config.prefix_for(&date)
    }

    /// Rewrite one record in place
    ///
    /// Returns `false` when the payload could not be decoded; the record is
    /// left exactly as it was.
    pub fn process_record(&self, record: &mut FirehoseRecord) -> bool {
        match self.decoder.decode(record) {
            Ok(payload) => {
                let prefix = self.derive_prefix(&payload);
                tracing::debug!(record_id = %record.record_id, %prefix, "Rewriting prefix");
                record.set_prefix(prefix);
                true
            }
            Err(e) => {
                tracing::warn!(
                    record_id = %record.record_id,
                    error = %e,
                    "Passing record through without prefix rewrite"
                );
                false
            }
        }
    }

    /// Rewrite every record of a batch, preserving count and order
    pub fn process_batch(&self, mut batch: FirehoseBatch) -> FirehoseBatch {
        let total = batch.records.len();
        let rewritten = batch
            .records
            .iter_mut()
            .map(|record| self.process_record(record))
            .filter(|ok| *ok)
            .count();

        tracing::info!(
            total,
            rewritten,
            passthrough = total - rewritten,
            "Partition batch processed"
        );

        batch
    }
}
