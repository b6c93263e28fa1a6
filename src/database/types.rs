//! Execution engine types and traits

use crate::error::Result;
use crate::statement::Statement;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where statements are executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Catalog / database name; `None` uses the engine's default
    #[serde(default)]
    pub catalog: Option<String>,
    /// Schema the statements are qualified with
    pub schema: String,
}

impl Target {
    /// Create a target for a schema in the default catalog
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: schema.into(),
        }
    }

    /// Set the catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.catalog {
            Some(catalog) => write!(f, "{catalog}.{}", self.schema),
            None => f.write_str(&self.schema),
        }
    }
}

/// Service that executes generated statements
///
/// Implementations must report a rejected statement as
/// [`Error::Execution`](crate::Error::Execution); the router treats any error
/// as fatal to the batch.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    /// Execute one statement against a target
    async fn execute(&self, target: &Target, statement: &Statement) -> Result<()>;

    /// Engine name, for logging
    fn name(&self) -> &'static str;
}
