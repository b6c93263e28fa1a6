//! Partition types
//!
//! Defines the prefix derivation settings.

use serde::{Deserialize, Serialize};

/// Payload field holding the record's date
pub const DEFAULT_DATE_FIELD: &str = "date";

/// Literal used when the date field is missing
pub const DEFAULT_FALLBACK_DATE: &str = "default_date_format";

/// Leading prefix segment
pub const DEFAULT_PREFIX_ROOT: &str = "manifests";

/// Configuration for prefix derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Payload field holding the date
    #[serde(default = "default_date_field")]
    pub date_field: String,

    /// Value used when the date field is absent or null
    #[serde(default = "default_fallback_date")]
    pub fallback_date: String,

    /// Leading prefix segment
    #[serde(default = "default_prefix_root")]
    pub prefix_root: String,
}

fn default_date_field() -> String {
    DEFAULT_DATE_FIELD.to_string()
}

fn default_fallback_date() -> String {
    DEFAULT_FALLBACK_DATE.to_string()
}

fn default_prefix_root() -> String {
    DEFAULT_PREFIX_ROOT.to_string()
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            date_field: default_date_field(),
            fallback_date: default_fallback_date(),
            prefix_root: default_prefix_root(),
        }
    }
}

impl PartitionConfig {
    /// Use a different date field
    #[must_use]
    pub fn with_date_field(mut self, field: impl Into<String>) -> Self {
        self.date_field = field.into();
        self
    }

    /// Use a different fallback literal
    #[must_use]
    pub fn with_fallback_date(mut self, fallback: impl Into<String>) -> Self {
        self.fallback_date = fallback.into();
        self
    }

    /// Build the prefix for a date value
    pub fn prefix_for(&self, date: &str) -> String {
        format!("{}/{date}/", self.prefix_root)
    }
}
