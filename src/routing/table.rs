//! Routing table
//!
//! The table is compiled in; it is never mutated at runtime.

use serde::{Deserialize, Serialize};

/// Table name used for streams with no known mapping
pub const UNKNOWN_TABLE: &str = "unknownTable";

/// Record families delivered through the known streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Per peer-connection metrics
    PcStats,
    /// Per media-track metrics
    TrackStats,
    /// Per meeting summary metrics
    MeetingStats,
    /// Meeting events (dominant speaker changes etc.)
    MeetingEvent,
    /// Face landmark samples
    FaceLandmarks,
    /// End-to-end ping measurements
    E2ePing,
}

impl StreamKind {
    /// All known stream kinds
    pub const ALL: [StreamKind; 6] = [
        StreamKind::PcStats,
        StreamKind::TrackStats,
        StreamKind::MeetingStats,
        StreamKind::MeetingEvent,
        StreamKind::FaceLandmarks,
        StreamKind::E2ePing,
    ];

    /// Stream identifier suffix
    pub fn suffix(self) -> &'static str {
        match self {
            StreamKind::PcStats => "pcStatsStream",
            StreamKind::TrackStats => "trackStatsStream",
            StreamKind::MeetingStats => "meetingStatsStream",
            StreamKind::MeetingEvent => "meetingEventStream",
            StreamKind::FaceLandmarks => "faceLandmarksStream",
            StreamKind::E2ePing => "e2ePingStream",
        }
    }

    /// Destination table
    pub fn table(self) -> &'static str {
        match self {
            StreamKind::PcStats => "rtcstats_pc_metrics",
            StreamKind::TrackStats => "rtcstats_track_metrics",
            StreamKind::MeetingStats => "rtcstats",
            StreamKind::MeetingEvent => "rtcstats_meeting_event",
            StreamKind::FaceLandmarks => "rtcstats_face_landmarks",
            StreamKind::E2ePing => "rtcstats_e2e_ping",
        }
    }

    /// Look up a kind by stream suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.suffix() == suffix)
    }

    /// Look up a kind by destination table
    pub fn from_table(table: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table() == table)
    }
}

/// What the router does with a stream that resolves to [`UNKNOWN_TABLE`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownStreamPolicy {
    /// Fail the batch before anything is submitted (default)
    #[default]
    Reject,
    /// Submit statements against the sentinel table
    Sentinel,
}

/// Static suffix → table routing
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingTable;

impl RoutingTable {
    /// Create the routing table
    pub fn new() -> Self {
        Self
    }

    /// Resolve a stream identifier to a known stream kind
    pub fn resolve(&self, stream_identifier: &str) -> Option<StreamKind> {
        StreamKind::from_suffix(stream_suffix(stream_identifier))
    }

    /// Resolve a stream identifier to a table, or the sentinel
    pub fn table_for(&self, stream_identifier: &str) -> &'static str {
        self.resolve(stream_identifier)
            .map_or(UNKNOWN_TABLE, StreamKind::table)
    }

    /// Known (suffix, table) pairs
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        StreamKind::ALL
            .into_iter()
            .map(|kind| (kind.suffix(), kind.table()))
    }
}

/// Final path segment of a stream identifier
pub fn stream_suffix(stream_identifier: &str) -> &str {
    stream_identifier
        .rsplit('/')
        .next()
        .unwrap_or(stream_identifier)
}

/// Map a stream identifier to its destination table
pub fn extract_table_name(stream_identifier: &str) -> &'static str {
    RoutingTable.table_for(stream_identifier)
}
