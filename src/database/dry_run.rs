//! Dry-run engine
//!
//! Logs statements instead of executing them.

use super::types::{ExecutionEngine, Target};
use crate::error::Result;
use crate::statement::Statement;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Engine that records statement text and always succeeds
#[derive(Debug, Default)]
pub struct DryRunEngine {
    statements: Mutex<Vec<String>>,
}

impl DryRunEngine {
    /// Create a new dry-run engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Statement texts seen so far, in submission order
    pub fn statements(&self) -> Vec<String> {
        self.recorded().clone()
    }

    // The log is append-only, so entries survive a panicking holder.
    fn recorded(&self) -> MutexGuard<'_, Vec<String>> {
        self.statements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ExecutionEngine for DryRunEngine {
    async fn execute(&self, target: &Target, statement: &Statement) -> Result<()> {
        let sql = statement.to_sql();
        tracing::info!(%target, %sql, "Dry run");

        self.recorded().push(sql);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Payload;
    use crate::statement::StatementBuilder;

    #[tokio::test]
    async fn test_dry_run_records_statements() {
        let engine = DryRunEngine::new();
        let statement = StatementBuilder::default()
            .build("t", &Payload::new().with_field("a", 1))
            .unwrap();

        engine.execute(&Target::new("public"), &statement).await.unwrap();
        engine.execute(&Target::new("public"), &statement).await.unwrap();

        assert_eq!(
            engine.statements(),
            vec![
                "INSERT INTO public.t (a) VALUES ('1');".to_string(),
                "INSERT INTO public.t (a) VALUES ('1');".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_dry_run_survives_poisoned_lock() {
        let engine = std::sync::Arc::new(DryRunEngine::new());
        let statement = StatementBuilder::default()
            .build("t", &Payload::new().with_field("a", 1))
            .unwrap();
        engine.execute(&Target::new("public"), &statement).await.unwrap();

        let holder = std::sync::Arc::clone(&engine);
        let joined = std::thread::spawn(move || {
            let _guard = holder.statements.lock().unwrap();
            panic!("holder panicked");
        })
        .join();
        assert!(joined.is_err());
        assert!(engine.statements.is_poisoned());

        engine.execute(&Target::new("public"), &statement).await.unwrap();
        assert_eq!(engine.statements().len(), 2);
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::new("public").to_string(), "public");
        assert_eq!(
            Target::new("public").with_catalog("dev").to_string(),
            "dev.public"
        );
    }
}
