//! Tests for partition module

use super::*;
use crate::decode::{Payload, PayloadEncoding};
use crate::types::{DestinationConfig, FirehoseBatch, FirehoseRecord};
use serde_json::json;

// ============================================================================
// PartitionConfig Tests
// ============================================================================

#[test]
fn test_partition_config_default() {
    let config = PartitionConfig::default();
    assert_eq!(config.date_field, "date");
    assert_eq!(config.fallback_date, "default_date_format");
    assert_eq!(config.prefix_root, "manifests");
}

#[test]
fn test_partition_config_prefix_for() {
    let config = PartitionConfig::default();
    assert_eq!(config.prefix_for("2024-01-31"), "manifests/2024-01-31/");
}

#[test]
fn test_partition_config_yaml_defaults() {
    let config: PartitionConfig = serde_yaml::from_str("date_field: day").unwrap();
    assert_eq!(config.date_field, "day");
    assert_eq!(config.fallback_date, DEFAULT_FALLBACK_DATE);
    assert_eq!(config.prefix_root, DEFAULT_PREFIX_ROOT);
}

// ============================================================================
// derive_prefix Tests
// ============================================================================

#[test]
fn test_derive_prefix_with_date() {
    let deriver = PartitionKeyDeriver::default();
    let payload = Payload::new().with_field("date", "2024-03-15");
    assert_eq!(deriver.derive_prefix(&payload), "manifests/2024-03-15/");
}

#[test]
fn test_derive_prefix_missing_date() {
    let deriver = PartitionKeyDeriver::default();
    let payload = Payload::new().with_field("other", "x");
    assert_eq!(
        deriver.derive_prefix(&payload),
        "manifests/default_date_format/"
    );
}

#[test]
fn test_derive_prefix_null_date_falls_back() {
    let deriver = PartitionKeyDeriver::default();
    let payload = Payload::new().with_field("date", json!(null));
    assert_eq!(
        deriver.derive_prefix(&payload),
        "manifests/default_date_format/"
    );
}

#[test]
fn test_derive_prefix_is_opaque() {
    // No parsing: malformed dates end up in the prefix as-is
    let deriver = PartitionKeyDeriver::default();

    let payload = Payload::new().with_field("date", "31/02/not-a-date");
    assert_eq!(deriver.derive_prefix(&payload), "manifests/31/02/not-a-date/");

    let payload = Payload::new().with_field("date", 20_240_101);
    assert_eq!(deriver.derive_prefix(&payload), "manifests/20240101/");
}

#[test]
fn test_derive_prefix_custom_field() {
    let deriver =
        PartitionKeyDeriver::new(PartitionConfig::default().with_date_field("eventDate"));
    let payload = Payload::new()
        .with_field("date", "ignored")
        .with_field("eventDate", "2023-12-24");
    assert_eq!(deriver.derive_prefix(&payload), "manifests/2023-12-24/");
}

// ============================================================================
// process_batch Tests
// ============================================================================

#[test]
fn test_process_batch_rewrites_prefixes() {
    let batch = FirehoseBatch::default()
        .with_record(
            FirehoseRecord::from_json("r1", &json!({"date": "2024-01-01"}))
                .with_destination(DestinationConfig::with_prefix("old/")),
        )
        .with_record(FirehoseRecord::from_json("r2", &json!({"value": 1})));

    let out = PartitionKeyDeriver::default().process_batch(batch);

    assert_eq!(out.records[0].prefix(), Some("manifests/2024-01-01/"));
    assert_eq!(out.records[1].prefix(), Some("manifests/default_date_format/"));
}

#[test]
fn test_process_batch_preserves_size_and_order() {
    let mut batch = FirehoseBatch::default();
    for i in 0..10 {
        let record = if i % 3 == 0 {
            FirehoseRecord::new(format!("r{i}"), "{{{ not json")
        } else {
            FirehoseRecord::from_json(format!("r{i}"), &json!({"date": format!("d{i}")}))
        };
        batch = batch.with_record(record);
    }

    let out = PartitionKeyDeriver::default().process_batch(batch);

    assert_eq!(out.len(), 10);
    for (i, record) in out.records.iter().enumerate() {
        assert_eq!(record.record_id, format!("r{i}"));
    }
}

#[test]
fn test_process_batch_decode_failure_passes_through() {
    let original = FirehoseRecord::new("bad", "%%%")
        .with_destination(DestinationConfig::with_prefix("keep/"));
    let batch = FirehoseBatch::default().with_record(original.clone());

    let out = PartitionKeyDeriver::default().process_batch(batch);

    assert_eq!(out.records[0], original);
}

#[test]
fn test_process_batch_plain_json_records() {
    let deriver =
        PartitionKeyDeriver::with_encoding(PartitionConfig::default(), PayloadEncoding::Plain);
    let batch = FirehoseBatch::default()
        .with_record(FirehoseRecord::new("r1", r#"{"date": "2022-02-02"}"#));

    let out = deriver.process_batch(batch);
    assert_eq!(out.records[0].prefix(), Some("manifests/2022-02-02/"));
}

#[test]
fn test_process_batch_empty() {
    let out = PartitionKeyDeriver::default().process_batch(FirehoseBatch::default());
    assert!(out.is_empty());
}
