//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::TransformConfig;
use crate::database::{DryRunEngine, DuckDbEngine, ExecutionEngine};
use crate::error::{Error, Result, ResultExt};
use crate::partition::PartitionKeyDeriver;
use crate::router::TableRouter;
use crate::routing::{extract_table_name, stream_suffix, RoutingTable, StreamKind};
use crate::types::FirehoseBatch;
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Build the execution engine described by the config
///
/// A dry run never opens the database.
pub fn build_engine(config: &TransformConfig, dry_run: bool) -> Result<Arc<dyn ExecutionEngine>> {
    if dry_run {
        return Ok(Arc::new(DryRunEngine::new()));
    }

    let engine = DuckDbEngine::open(&config.database.path)?;
    if let Some(init_sql) = &config.database.init_sql {
        engine.execute_batch(init_sql)?;
    }
    tracing::info!(path = %engine.path(), "Using DuckDB engine");

    Ok(Arc::new(engine))
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Partition { input } => self.partition(input),
            Commands::Route {
                input,
                database,
                dry_run,
            } => self.route(input, database.as_deref(), *dry_run).await,
            Commands::TableName { stream } => self.table_name(stream),
            Commands::Routes => self.routes(),
            Commands::Serve {
                port,
                database,
                dry_run,
            } => {
                let config = self.load_config(database.as_deref())?;
                let engine = build_engine(&config, *dry_run)?;
                crate::cli::serve(&config, engine, *port).await
            }
        }
    }

    /// Load config from the `--config` file and environment
    fn load_config(&self, database: Option<&str>) -> Result<TransformConfig> {
        let mut config = TransformConfig::resolve(self.cli.config.as_deref())?;
        if let Some(path) = database {
            config.database.path = path.to_string();
        }
        Ok(config)
    }

    /// Rewrite prefixes and print the batch
    fn partition(&self, input: &Path) -> Result<()> {
        let config = self.load_config(None)?;
        let batch = read_batch(input)?;

        let deriver = PartitionKeyDeriver::with_encoding(config.partition, config.encoding);
        let batch = deriver.process_batch(batch);

        self.emit(&batch)
    }

    /// Submit a batch and print the outcome
    async fn route(&self, input: &Path, database: Option<&str>, dry_run: bool) -> Result<()> {
        let config = self.load_config(database)?;
        let batch = read_batch(input)?;

        let engine = build_engine(&config, dry_run)?;
        let router = TableRouter::with_encoding(engine, config.routing, config.encoding);
        let outcome = router.process_batch(&batch).await;

        self.emit(&outcome)?;

        if outcome.is_success() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "batch failed after {} of {} records: {}",
                outcome.submitted,
                outcome.total,
                outcome.error.unwrap_or_default()
            )))
        }
    }

    /// Print the table for a stream identifier
    fn table_name(&self, stream: &str) -> Result<()> {
        let table = extract_table_name(stream);
        let kind = StreamKind::from_table(table);

        self.emit(&json!({
            "stream": stream,
            "suffix": stream_suffix(stream),
            "table": table,
            "known": kind.is_some(),
        }))
    }

    /// Print the routing table
    fn routes(&self) -> Result<()> {
        let routes: Vec<_> = RoutingTable::new()
            .entries()
            .map(|(suffix, table)| json!({ "suffix": suffix, "table": table }))
            .collect();

        self.emit(&json!({ "routes": routes }))
    }

    /// Write a value to stdout in the selected format
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{output}");
        Ok(())
    }
}

/// Read a batch from a file, or stdin for `-`
fn read_batch(input: &Path) -> Result<FirehoseBatch> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read batch from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read batch '{}'", input.display()))?
    };

    Ok(serde_json::from_str(&text)?)
}
