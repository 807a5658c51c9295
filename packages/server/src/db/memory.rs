//! Scripted in-memory [`Database`] for tests.
//!
//! Responses are registered as (pattern, result) rules: the first rule
//! whose pattern is a substring of the executed SQL wins. Every executed
//! query is logged with its parameters so tests can assert on the exact
//! SQL text and bind order.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{Database, SqlRow, SqlValue};

type CannedResult = Result<Vec<SqlRow>, String>;

/// Rule-based fake database.
#[derive(Default)]
pub struct MemoryDatabase {
    rules: Mutex<Vec<(String, CannedResult)>>,
    log: Mutex<Vec<(String, Vec<SqlValue>)>>,
}

impl MemoryDatabase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers rows to return for any SQL containing `pattern`.
    pub fn on(&self, pattern: &str, rows: Vec<SqlRow>) {
        self.rules
            .lock()
            .expect("rules lock")
            .push((pattern.to_string(), Ok(rows)));
    }

    /// Registers a failure for any SQL containing `pattern`.
    pub fn fail_on(&self, pattern: &str, message: &str) {
        self.rules
            .lock()
            .expect("rules lock")
            .push((pattern.to_string(), Err(message.to_string())));
    }

    /// All executed queries with their bound parameters, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.log.lock().expect("log lock").clone()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> anyhow::Result<Vec<SqlRow>> {
        self.log
            .lock()
            .expect("log lock")
            .push((sql.to_string(), params.to_vec()));

        let rules = self.rules.lock().expect("rules lock");
        for (pattern, result) in rules.iter() {
            if sql.contains(pattern.as_str()) {
                return match result {
                    Ok(rows) => Ok(rows.clone()),
                    Err(message) => Err(anyhow::anyhow!("{message}")),
                };
            }
        }
        Ok(Vec::new())
    }
}
