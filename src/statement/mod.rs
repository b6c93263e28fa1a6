//! Insert statement module
//!
//! Builds one `INSERT` per record from a flat payload.
//!
//! # Overview
//!
//! Columns follow the payload's field order. A [`Statement`] can be rendered
//! two ways:
//!
//! - [`Statement::to_sql`]: values inlined as `'text'` literals with no
//!   escaping, `NULL` for nulls. Only for engines that accept plain text.
//! - [`Statement::to_parameterized`]: `$1, $2, ...` placeholders with the
//!   values carried separately for binding.

mod builder;

pub use builder::{
    build_statement, validate_identifier, ParameterizedStatement, SqlValue, Statement,
    StatementBuilder, DEFAULT_SCHEMA,
};
