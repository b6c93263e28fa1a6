//! Common types used throughout firehose-transform
//!
//! This module contains the delivery-stream batch contract: batches,
//! records and the per-record destination configuration.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion-ordered, `preserve_order` is enabled)
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Destination Configuration
// ============================================================================

/// Object-storage destination settings attached to a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationConfig {
    /// Key prefix for objects written from this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Any other destination attributes, passed through untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl DestinationConfig {
    /// Create a destination config with a prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            extra: JsonObject::new(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// One event unit within a delivery batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseRecord {
    /// Identifier assigned by the delivery stream
    #[serde(default)]
    pub record_id: String,

    /// Encoded payload (base64 or raw JSON text)
    pub data: String,

    /// Arrival time in milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approximate_arrival_timestamp: Option<i64>,

    /// Destination settings rewritten by the partition deriver
    #[serde(
        default,
        rename = "s3DestinationConfiguration",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<DestinationConfig>,

    /// Any other record attributes, passed through untouched
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl FirehoseRecord {
    /// Create a record from an id and encoded data
    pub fn new(record_id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            data: data.into(),
            approximate_arrival_timestamp: None,
            destination: None,
            extra: JsonObject::new(),
        }
    }

    /// Create a record whose data is the base64 encoding of `json`
    pub fn from_json(record_id: impl Into<String>, json: &JsonValue) -> Self {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(json.to_string());
        Self::new(record_id, encoded)
    }

    /// Current destination prefix, if any
    pub fn prefix(&self) -> Option<&str> {
        self.destination.as_ref().and_then(|d| d.prefix.as_deref())
    }

    /// Rewrite the destination prefix, creating the destination config if missing
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.destination.get_or_insert_with(DestinationConfig::default).prefix =
            Some(prefix.into());
    }

    /// Attach a destination config
    #[must_use]
    pub fn with_destination(mut self, destination: DestinationConfig) -> Self {
        self.destination = Some(destination);
        self
    }
}

// ============================================================================
// Batch
// ============================================================================

/// Records delivered together in one invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseBatch {
    /// Invocation identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,

    /// Identifier of the originating delivery stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_stream_arn: Option<String>,

    /// Region of the delivery stream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Records in delivery order
    #[serde(default)]
    pub records: Vec<FirehoseRecord>,
}

impl FirehoseBatch {
    /// Create a batch for a stream
    pub fn new(stream_identifier: impl Into<String>) -> Self {
        Self {
            delivery_stream_arn: Some(stream_identifier.into()),
            ..Default::default()
        }
    }

    /// Add a record
    #[must_use]
    pub fn with_record(mut self, record: FirehoseRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Stream identifier shared by all records (empty if absent)
    pub fn stream_identifier(&self) -> &str {
        self.delivery_stream_arn.as_deref().unwrap_or_default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_deserialize() {
        let batch: FirehoseBatch = serde_json::from_value(json!({
            "invocationId": "inv-1",
            "deliveryStreamArn": "arn:aws:firehose:us-east-1:123:deliverystream/pcStatsStream",
            "region": "us-east-1",
            "records": [
                {
                    "recordId": "r1",
                    "approximateArrivalTimestamp": 1_700_000_000_000_i64,
                    "data": "eyJpZCI6IjEifQ==",
                    "s3DestinationConfiguration": { "prefix": "old/", "bucket": "b" }
                }
            ]
        }))
        .unwrap();

        assert_eq!(batch.len(), 1);
        assert!(batch.stream_identifier().ends_with("/pcStatsStream"));
        let record = &batch.records[0];
        assert_eq!(record.record_id, "r1");
        assert_eq!(record.prefix(), Some("old/"));
        assert_eq!(
            record.destination.as_ref().unwrap().extra.get("bucket"),
            Some(&json!("b"))
        );
    }

    #[test]
    fn test_record_passthrough_attributes() {
        let value = json!({
            "recordId": "r1",
            "data": "e30=",
            "metadata": { "partitionKeys": {} }
        });
        let record: FirehoseRecord = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), value);
    }

    #[test]
    fn test_set_prefix_creates_destination() {
        let mut record = FirehoseRecord::new("r1", "e30=");
        assert!(record.prefix().is_none());

        record.set_prefix("manifests/2024-01-01/");
        assert_eq!(record.prefix(), Some("manifests/2024-01-01/"));
    }

    #[test]
    fn test_missing_stream_identifier() {
        let batch = FirehoseBatch::default();
        assert_eq!(batch.stream_identifier(), "");
        assert!(batch.is_empty());
    }
}
