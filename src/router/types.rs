//! Router types
//!
//! Router configuration and the batch-level outcome.

use crate::database::Target;
use crate::error::Error;
use crate::routing::UnknownStreamPolicy;
use crate::statement::DEFAULT_SCHEMA;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration for the table router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Schema statements are qualified with
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Catalog / database the engine should use
    #[serde(default)]
    pub catalog: Option<String>,

    /// Handling of streams outside the routing table
    #[serde(default)]
    pub unknown_stream: UnknownStreamPolicy,
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            catalog: None,
            unknown_stream: UnknownStreamPolicy::default(),
        }
    }
}

impl RouterConfig {
    /// Set the unknown-stream policy
    #[must_use]
    pub fn with_unknown_stream(mut self, policy: UnknownStreamPolicy) -> Self {
        self.unknown_stream = policy;
        self
    }

    /// Set the catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Execution target described by this config
    pub fn target(&self) -> Target {
        Target {
            catalog: self.catalog.clone(),
            schema: self.schema.clone(),
        }
    }
}

/// Terminal status of a routed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every record was submitted
    Succeeded,
    /// Processing stopped at the first failure
    Failed,
}

/// Category of the failure that stopped a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Payload could not be decoded
    Decode,
    /// Payload decoded but cannot become a statement
    InvalidPayload,
    /// Stream not in the routing table
    UnknownStream,
    /// Engine rejected the statement
    Execution,
    /// Anything else
    Internal,
}

impl From<&Error> for FailureKind {
    fn from(err: &Error) -> Self {
        match err {
            Error::Decode { .. } => FailureKind::Decode,
            Error::UnsupportedValue { .. }
            | Error::InvalidIdentifier { .. }
            | Error::EmptyPayload { .. } => FailureKind::InvalidPayload,
            Error::UnknownStream { .. } => FailureKind::UnknownStream,
            Error::Execution { .. } => FailureKind::Execution,
            _ => FailureKind::Internal,
        }
    }
}

/// Result of routing one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Terminal status
    pub status: BatchStatus,
    /// Stream identifier of the batch
    pub stream: String,
    /// Resolved table (absent when the stream was rejected)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Records in the batch
    pub total: usize,
    /// Records whose statements were executed
    pub submitted: usize,
    /// Record that stopped the batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_record_id: Option<String>,
    /// Failure category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// Failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// When processing finished
    pub completed_at: DateTime<Utc>,
}

impl BatchOutcome {
    /// Successful outcome
    pub fn succeeded(stream: impl Into<String>, table: impl Into<String>, total: usize) -> Self {
        Self {
            status: BatchStatus::Succeeded,
            stream: stream.into(),
            table: Some(table.into()),
            total,
            submitted: total,
            failed_record_id: None,
            failure: None,
            error: None,
            completed_at: Utc::now(),
        }
    }

    /// Failed outcome
    pub fn failed(
        stream: impl Into<String>,
        table: Option<String>,
        total: usize,
        submitted: usize,
        failed_record_id: Option<String>,
        err: &Error,
    ) -> Self {
        Self {
            status: BatchStatus::Failed,
            stream: stream.into(),
            table,
            total,
            submitted,
            failed_record_id,
            failure: Some(FailureKind::from(err)),
            error: Some(err.to_string()),
            completed_at: Utc::now(),
        }
    }

    /// Whether every record was submitted
    pub fn is_success(&self) -> bool {
        self.status == BatchStatus::Succeeded
    }
}
