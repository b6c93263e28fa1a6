//! Statement builder
//!
//! Turns a table name and a payload into an insert statement.

use crate::decode::{scalar_text, Payload};
use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Schema used when none is configured
pub const DEFAULT_SCHEMA: &str = "public";

/// Plain unquoted SQL identifier
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Check that a name can be used unquoted as a table or column identifier
pub fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(Error::invalid_identifier(name))
    }
}

/// A value destined for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL `NULL`
    Null,
    /// Text form of a string, number or boolean
    Text(String),
}

impl SqlValue {
    /// Whether this is `NULL`
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Text value, `None` for `NULL`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Null => None,
            SqlValue::Text(s) => Some(s),
        }
    }

    /// Literal rendering: `NULL` or `'text'`, no escaping
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Text(s) => format!("'{s}'"),
        }
    }
}

/// Insert statement for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Target schema
    pub schema: String,
    /// Target table
    pub table: String,
    /// Columns, in payload order
    pub columns: Vec<String>,
    /// Values, aligned with `columns`
    pub values: Vec<SqlValue>,
}

/// Statement text with positional placeholders and its bound values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterizedStatement {
    /// SQL with `$1, $2, ...` placeholders
    pub sql: String,
    /// Values in placeholder order
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Qualified target, e.g. `public.rtcstats`
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    /// Render with inlined literal values
    pub fn to_sql(&self) -> String {
        let values: Vec<String> = self.values.iter().map(SqlValue::to_literal).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({});",
            self.qualified_table(),
            self.columns.join(", "),
            values.join(", ")
        )
    }

    /// Render with positional placeholders
    pub fn to_parameterized(&self) -> ParameterizedStatement {
        let placeholders: Vec<String> = (1..=self.values.len()).map(|i| format!("${i}")).collect();
        ParameterizedStatement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({});",
                self.qualified_table(),
                self.columns.join(", "),
                placeholders.join(", ")
            ),
            params: self.values.clone(),
        }
    }

    /// Check schema, table and column names
    pub fn validate_identifiers(&self) -> Result<()> {
        validate_identifier(&self.schema)?;
        validate_identifier(&self.table)?;
        self.columns
            .iter()
            .try_for_each(|column| validate_identifier(column))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Builds insert statements against one schema
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    schema: String,
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

impl StatementBuilder {
    /// Create a builder for a schema
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Target schema
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Build the insert statement for a payload
    ///
    /// Fails on an empty payload or on nested array/object values.
    pub fn build(&self, table: &str, payload: &Payload) -> Result<Statement> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload {
                table: table.to_string(),
            });
        }
        payload.ensure_flat()?;

        let (columns, values) = payload
            .iter()
            .map(|(name, value)| {
                let value = scalar_text(value).map_or(SqlValue::Null, SqlValue::Text);
                (name.clone(), value)
            })
            .unzip();

        Ok(Statement {
            schema: self.schema.clone(),
            table: table.to_string(),
            columns,
            values,
        })
    }
}

/// Build the literal insert text for a payload against the `public` schema
pub fn build_statement(table: &str, payload: &Payload) -> Result<String> {
    StatementBuilder::default()
        .build(table, payload)
        .map(|statement| statement.to_sql())
}
