//! DuckDB-based execution engine
//!
//! Executes insert statements on an embedded DuckDB database, either
//! in-memory or file-backed. Values are bound as parameters, never inlined.

use super::types::{ExecutionEngine, Target};
use crate::error::{Error, Result};
use crate::statement::{validate_identifier, Statement};
use async_trait::async_trait;
use duckdb::Connection;
use std::sync::{Arc, Mutex};

/// In-memory database path
const MEMORY_PATH: &str = ":memory:";

/// Execution engine backed by a DuckDB connection
pub struct DuckDbEngine {
    /// DuckDB connection, shared with blocking tasks
    conn: Arc<Mutex<Connection>>,
    /// Database path (for logging)
    path: String,
}

impl DuckDbEngine {
    /// Open an in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::open(MEMORY_PATH)
    }

    /// Open a database file, or `:memory:`
    pub fn open(path: &str) -> Result<Self> {
        let conn = if path == MEMORY_PATH {
            Connection::open_in_memory()
        } else {
            Connection::open(path)
        }
        .map_err(|e| Error::config(format!("Failed to open DuckDB database '{path}': {e}")))?;

        tracing::debug!(path, "Opened DuckDB database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: path.to_string(),
        })
    }

    /// Database path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Attach another database file under an alias, usable as a catalog
    pub fn attach(&self, alias: &str, path: &str) -> Result<()> {
        validate_identifier(alias)?;
        let quoted = path.replace('\'', "''");
        self.execute_batch(&format!("ATTACH '{quoted}' AS {alias};"))
            .map_err(|e| Error::config(format!("Failed to attach '{path}' as {alias}: {e}")))
    }

    /// Run setup SQL (DDL etc.) synchronously
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| Error::config(format!("Failed to execute SQL: {e}")))
    }

    /// Count rows in a qualified table
    pub fn count_rows(&self, qualified_table: &str) -> Result<i64> {
        let conn = self.lock()?;
        conn.query_row(&format!("SELECT COUNT(*) FROM {qualified_table}"), [], |row| {
            row.get(0)
        })
        .map_err(|e| Error::config(format!("Failed to count rows in {qualified_table}: {e}")))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| Error::config(format!("DuckDB connection lock poisoned: {e}")))
    }
}

#[async_trait]
impl ExecutionEngine for DuckDbEngine {
    async fn execute(&self, target: &Target, statement: &Statement) -> Result<()> {
        statement.validate_identifiers()?;
        if let Some(catalog) = &target.catalog {
            validate_identifier(catalog)?;
        }

        let prepared = statement.to_parameterized();
        let params: Vec<Option<String>> = prepared
            .params
            .iter()
            .map(|value| value.as_text().map(str::to_string))
            .collect();
        let catalog = target.catalog.clone();
        let table = statement.table.clone();
        let conn = Arc::clone(&self.conn);

        tracing::debug!(%target, sql = %prepared.sql, "Executing statement");

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| Error::execution(&table, format!("connection lock poisoned: {e}")))?;

            if let Some(catalog) = catalog {
                conn.execute_batch(&format!("USE {catalog};"))
                    .map_err(|e| Error::execution(&table, e.to_string()))?;
            }

            conn.execute(&prepared.sql, duckdb::params_from_iter(params))
                .map_err(|e| Error::execution(&table, e.to_string()))?;

            Ok::<(), Error>(())
        })
        .await
        .map_err(|e| Error::execution(&statement.table, format!("execution task failed: {e}")))?
    }

    fn name(&self) -> &'static str {
        "duckdb"
    }
}
