//! Tests for routing module

use super::*;
use test_case::test_case;

const ARN_PREFIX: &str = "arn:aws:firehose:us-east-1:123456789012:deliverystream";

#[test_case("pcStatsStream", "rtcstats_pc_metrics")]
#[test_case("trackStatsStream", "rtcstats_track_metrics")]
#[test_case("meetingStatsStream", "rtcstats")]
#[test_case("meetingEventStream", "rtcstats_meeting_event")]
#[test_case("faceLandmarksStream", "rtcstats_face_landmarks")]
#[test_case("e2ePingStream", "rtcstats_e2e_ping")]
fn test_known_streams(suffix: &str, table: &str) {
    assert_eq!(extract_table_name(&format!("{ARN_PREFIX}/{suffix}")), table);
    assert_eq!(extract_table_name(suffix), table);
}

#[test_case("otherStream")]
#[test_case("")]
#[test_case("pcstatsstream")]
#[test_case("pcStatsStream/")]
#[test_case("pcStatsStream/extra")]
fn test_unknown_streams(identifier: &str) {
    assert_eq!(extract_table_name(identifier), UNKNOWN_TABLE);
}

#[test]
fn test_stream_suffix() {
    assert_eq!(stream_suffix("a/b/c"), "c");
    assert_eq!(stream_suffix("single"), "single");
    assert_eq!(stream_suffix("trailing/"), "");
}

#[test]
fn test_routing_table_entries() {
    let table = RoutingTable::new();
    let entries: Vec<_> = table.entries().collect();
    assert_eq!(entries.len(), 6);
    assert!(entries.contains(&("meetingStatsStream", "rtcstats")));
}

#[test]
fn test_stream_kind_round_trip_lookups() {
    for kind in StreamKind::ALL {
        assert_eq!(StreamKind::from_suffix(kind.suffix()), Some(kind));
        assert_eq!(StreamKind::from_table(kind.table()), Some(kind));
    }
    assert_eq!(StreamKind::from_table(UNKNOWN_TABLE), None);
}

#[test]
fn test_resolve() {
    let table = RoutingTable::new();
    assert_eq!(
        table.resolve(&format!("{ARN_PREFIX}/e2ePingStream")),
        Some(StreamKind::E2ePing)
    );
    assert_eq!(table.resolve("nope"), None);
}

#[test]
fn test_unknown_stream_policy_default() {
    assert_eq!(UnknownStreamPolicy::default(), UnknownStreamPolicy::Reject);
    let policy: UnknownStreamPolicy = serde_yaml::from_str("sentinel").unwrap();
    assert_eq!(policy, UnknownStreamPolicy::Sentinel);
}
