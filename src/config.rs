//! Configuration for the transformation stage
//!
//! This module contains the structures loaded from the YAML config file.
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration.

use crate::decode::PayloadEncoding;
use crate::error::{Error, Result, ResultExt};
use crate::partition::PartitionConfig;
use crate::router::RouterConfig;
use crate::statement::validate_identifier;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `routing.schema`
pub const ENV_SCHEMA: &str = "FIREHOSE_TRANSFORM_SCHEMA";

/// Environment variable overriding `routing.catalog`
pub const ENV_CATALOG: &str = "FIREHOSE_TRANSFORM_CATALOG";

/// Environment variable overriding `database.path`
pub const ENV_DATABASE: &str = "FIREHOSE_TRANSFORM_DATABASE";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Transport encoding of record data
    #[serde(default)]
    pub encoding: PayloadEncoding,

    /// Prefix derivation settings
    #[serde(default)]
    pub partition: PartitionConfig,

    /// Table routing settings
    #[serde(default)]
    pub routing: RouterConfig,

    /// Embedded database settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

// ============================================================================
// Database
// ============================================================================

/// Embedded DuckDB settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, or `:memory:`
    #[serde(default = "default_database_path")]
    pub path: String,

    /// SQL run once after opening (e.g. CREATE TABLE IF NOT EXISTS ...)
    #[serde(default)]
    pub init_sql: Option<String>,
}

fn default_database_path() -> String {
    ":memory:".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            init_sql: None,
        }
    }
}

impl TransformConfig {
    /// Parse a config from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        Self::from_yaml(&yaml)
    }

    /// Load a config file if given, then apply environment overrides
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(schema) = lookup(ENV_SCHEMA) {
            self.routing.schema = schema;
        }
        if let Some(catalog) = lookup(ENV_CATALOG) {
            self.routing.catalog = Some(catalog).filter(|c| !c.is_empty());
        }
        if let Some(path) = lookup(ENV_DATABASE) {
            self.database.path = path;
        }
    }

    /// Check identifiers and required values
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.routing.schema)
            .map_err(|_| Error::config(format!("invalid schema '{}'", self.routing.schema)))?;

        if let Some(catalog) = &self.routing.catalog {
            validate_identifier(catalog)
                .map_err(|_| Error::config(format!("invalid catalog '{catalog}'")))?;
        }

        if self.partition.date_field.is_empty() {
            return Err(Error::config("partition.date_field must not be empty"));
        }

        if self.database.path.is_empty() {
            return Err(Error::config("database.path must not be empty"));
        }

        Ok(())
    }
}
