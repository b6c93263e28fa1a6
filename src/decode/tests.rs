//! Tests for decoder module

use super::*;
use crate::error::Error;
use crate::types::FirehoseRecord;
use serde_json::json;

// ============================================================================
// Payload Tests
// ============================================================================

#[test]
fn test_payload_preserves_field_order() {
    let payload = Payload::parse(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
    let names: Vec<&str> = payload.field_names().collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_payload_rejects_non_object() {
    assert!(Payload::parse("[1, 2, 3]").is_err());
    assert!(Payload::parse("\"text\"").is_err());
    assert!(Payload::parse("not json").is_err());
}

#[test]
fn test_payload_builder() {
    let payload = Payload::new()
        .with_field("id", "1")
        .with_field("value", json!(null));

    assert_eq!(payload.len(), 2);
    assert_eq!(payload.get("id"), Some(&json!("1")));
    assert_eq!(payload.get("value"), Some(&json!(null)));
}

#[test]
fn test_payload_ensure_flat() {
    let flat = Payload::parse(r#"{"a": 1, "b": null, "c": "x", "d": true}"#).unwrap();
    assert!(flat.ensure_flat().is_ok());

    let nested = Payload::parse(r#"{"a": 1, "b": {"inner": 2}}"#).unwrap();
    match nested.ensure_flat() {
        Err(Error::UnsupportedValue { field, kind }) => {
            assert_eq!(field, "b");
            assert_eq!(kind, "object");
        }
        other => panic!("Expected UnsupportedValue, got {other:?}"),
    }

    let array = Payload::parse(r#"{"list": [1, 2]}"#).unwrap();
    assert!(array.ensure_flat().is_err());
}

#[test]
fn test_scalar_text() {
    assert_eq!(scalar_text(&json!("2024-01-01")), Some("2024-01-01".to_string()));
    assert_eq!(scalar_text(&json!(42)), Some("42".to_string()));
    assert_eq!(scalar_text(&json!(1.5)), Some("1.5".to_string()));
    assert_eq!(scalar_text(&json!(false)), Some("false".to_string()));
    assert_eq!(scalar_text(&json!(null)), None);
    assert_eq!(scalar_text(&json!([1])), None);
}

// ============================================================================
// Decoder Tests
// ============================================================================

#[test]
fn test_base64_decoder() {
    let record = FirehoseRecord::from_json("r1", &json!({"id": "1", "value": null}));
    let payload = Base64JsonDecoder::new().decode(&record).unwrap();

    assert_eq!(payload.get("id"), Some(&json!("1")));
    assert_eq!(payload.get("value"), Some(&json!(null)));
}

#[test]
fn test_base64_decoder_invalid() {
    let record = FirehoseRecord::new("r1", "%%%not-base64%%%");
    match Base64JsonDecoder::new().decode(&record) {
        Err(Error::Decode { record_id, message }) => {
            assert_eq!(record_id, "r1");
            assert!(message.contains("invalid base64"));
        }
        other => panic!("Expected Decode error, got {other:?}"),
    }
}

#[test]
fn test_base64_decoder_not_json() {
    // "hello world"
    let record = FirehoseRecord::new("r1", "aGVsbG8gd29ybGQ=");
    assert!(matches!(
        Base64JsonDecoder::new().decode(&record),
        Err(Error::Decode { .. })
    ));
}

#[test]
fn test_plain_decoder() {
    let record = FirehoseRecord::new("r1", r#"{"date": "2024-05-01"}"#);
    let payload = PlainJsonDecoder::new().decode(&record).unwrap();
    assert_eq!(payload.get("date"), Some(&json!("2024-05-01")));
}

#[test]
fn test_auto_decoder_accepts_both() {
    let decoder = AutoDecoder::new();

    let encoded = FirehoseRecord::from_json("r1", &json!({"a": 1}));
    assert_eq!(decoder.decode(&encoded).unwrap().get("a"), Some(&json!(1)));

    let plain = FirehoseRecord::new("r2", r#"{"a": 2}"#);
    assert_eq!(decoder.decode(&plain).unwrap().get("a"), Some(&json!(2)));
}

#[test]
fn test_auto_decoder_reports_both_failures() {
    let record = FirehoseRecord::new("r3", "{broken");
    let err = AutoDecoder::new().decode(&record).unwrap_err();
    assert!(err.to_string().contains("r3"));
    assert!(err.to_string().contains("nor JSON text"));
}

#[test]
fn test_decoder_for() {
    assert_eq!(decoder_for(PayloadEncoding::Auto).encoding(), PayloadEncoding::Auto);
    assert_eq!(decoder_for(PayloadEncoding::Base64).encoding(), PayloadEncoding::Base64);
    assert_eq!(decoder_for(PayloadEncoding::Plain).encoding(), PayloadEncoding::Plain);
    assert_eq!(PayloadEncoding::default(), PayloadEncoding::Auto);
}
