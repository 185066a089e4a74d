//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::ExpenseId;
use crate::Config;
use tempfile::TempDir;

/// Test environment that sets up a home directory with Config and database.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    _temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment with Config and initialized database.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("expenses");
        let config = Config::create(&root).await.unwrap();

        Self {
            _temp_dir: temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Records an expense through the tracker and returns its id.
    pub async fn insert_expense(&self, date: &str, amount: &str, category: &str) -> ExpenseId {
        self.config
            .tracker()
            .record_expense(date, amount, category)
            .await
            .unwrap()
    }

    /// Records 2024-03-05 42.50 Groceries and 2024-03-20 10.00 Transport.
    pub async fn insert_march(&self) -> (ExpenseId, ExpenseId) {
        let groceries = self.insert_expense("2024-03-05", "42.50", "Groceries").await;
        let transport = self.insert_expense("2024-03-20", "10.00", "Transport").await;
        (groceries, transport)
    }

    /// Number of stored expenses.
    pub async fn count(&self) -> usize {
        use crate::store::ExpenseStore;
        self.config.store().fetch_all().await.unwrap().len()
    }
}
