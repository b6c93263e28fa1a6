//! Table router implementation

use super::types::{BatchOutcome, RouterConfig};
use crate::database::{ExecutionEngine, Target};
use crate::decode::{decoder_for, PayloadDecoder, PayloadEncoding};
use crate::error::{Error, Result};
use crate::routing::{stream_suffix, RoutingTable, UnknownStreamPolicy, UNKNOWN_TABLE};
use crate::statement::{Statement, StatementBuilder};
use crate::types::{FirehoseBatch, FirehoseRecord};
use std::sync::Arc;
use std::time::Instant;

/// Routes batches to tables and submits one insert per record
pub struct TableRouter {
    engine: Arc<dyn ExecutionEngine>,
    routing: RoutingTable,
    builder: StatementBuilder,
    target: Target,
    unknown_stream: UnknownStreamPolicy,
    decoder: Box<dyn PayloadDecoder>,
}

impl TableRouter {
    /// Create a router that auto-detects the payload encoding
    pub fn new(engine: Arc<dyn ExecutionEngine>, config: RouterConfig) -> Self {
        Self::with_encoding(engine, config, PayloadEncoding::Auto)
    }

    /// Create a router for a fixed payload encoding
    pub fn with_encoding(
        engine: Arc<dyn ExecutionEngine>,
        config: RouterConfig,
        encoding: PayloadEncoding,
    ) -> Self {
        Self {
            engine,
            routing: RoutingTable::new(),
            builder: StatementBuilder::new(config.schema.clone()),
            target: config.target(),
            unknown_stream: config.unknown_stream,
            decoder: decoder_for(encoding),
        }
    }

    /// Execution target
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Resolve the destination table, applying the unknown-stream policy
    pub fn resolve_table(&self, stream_identifier: &str) -> Result<&'static str> {
        let table = self.routing.table_for(stream_identifier);
        if table == UNKNOWN_TABLE && self.unknown_stream == UnknownStreamPolicy::Reject {
            return Err(Error::unknown_stream(
                stream_identifier,
                stream_suffix(stream_identifier),
            ));
        }
        Ok(table)
    }

    /// Decode a record and build its statement
    pub fn statement_for(&self, table: &str, record: &FirehoseRecord) -> Result<Statement> {
        let payload = self.decoder.decode(record)?;
        let statement = self.builder.build(table, &payload)?;
        statement.validate_identifiers()?;
        Ok(statement)
    }

    /// Build and submit one record's statement
    pub async fn submit_record(&self, table: &str, record: &FirehoseRecord) -> Result<()> {
        let statement = self.statement_for(table, record)?;
        tracing::debug!(
            record_id = %record.record_id,
            table = %statement.qualified_table(),
            columns = statement.columns.len(),
            "Submitting statement"
        );
        self.engine.execute(&self.target, &statement).await
    }

    /// Process a batch, stopping at the first failing record
    pub async fn process_batch(&self, batch: &FirehoseBatch) -> BatchOutcome {
        let started = Instant::now();
        let stream = batch.stream_identifier();
        let total = batch.len();

        let table = match self.resolve_table(stream) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(stream, error = %e, "Rejecting batch");
                return BatchOutcome::failed(stream, None, total, 0, None, &e);
            }
        };

        if table == UNKNOWN_TABLE {
            tracing::warn!(stream, "Routing batch to sentinel table");
        }

        for (submitted, record) in batch.records.iter().enumerate() {
            if let Err(e) = self.submit_record(table, record).await {
                tracing::error!(
                    stream,
                    table,
                    record_id = %record.record_id,
                    submitted,
                    error = %e,
                    "Batch failed"
                );
                return BatchOutcome::failed(
                    stream,
                    Some(table.to_string()),
                    total,
                    submitted,
                    Some(record.record_id.clone()),
                    &e,
                );
            }
        }

        tracing::info!(
            stream,
            table,
            records = total,
            engine = self.engine.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch submitted"
        );

        BatchOutcome::succeeded(stream, table, total)
    }
}
