//! The SQLite implementation of [`ExpenseStore`].

use super::{migrations, ExpenseStore};
use crate::error::{ErrorType, IntoResult};
use crate::model::{Expense, ExpenseId, NewExpense, DATE_FORMAT};
use crate::Result;
use anyhow::{bail, Context};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};
use tracing::debug;

const MAX_CONNECTIONS: u32 = 4;

/// Expenses stored in a SQLite database file.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteStore {
    /// - Validates that no file currently exists at `path`
    /// - Creates a new SQLite file at `path`
    /// - Initializes the database schema
    pub async fn init(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::init_inner(path)
            .await
            .with_context(|| format!("Unable to create the database at {}", path.display()))
            .pub_result(ErrorType::Storage)
    }

    /// - Validates that there is a SQLite file at `path`
    /// - Updates the database schema with migrations if it is out-of-date
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_inner(path)
            .await
            .with_context(|| format!("Unable to load the database at {}", path.display()))
            .pub_result(ErrorType::Storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema version recorded in the database.
    pub async fn schema_version(&self) -> Result<i32> {
        migrations::current_version(&self.pool)
            .await
            .pub_result(ErrorType::Storage)
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await
    }

    async fn init_inner(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            bail!("A file already exists at {}", path.display());
        }
        Self::open(path, true).await
    }

    async fn load_inner(path: &Path) -> anyhow::Result<Self> {
        if !path.is_file() {
            bail!("The database file is missing");
        }
        Self::open(path, false).await
    }

    async fn open(path: &Path, create: bool) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(create)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite")?;

        migrations::bootstrap(&pool).await?;
        let current = migrations::current_version(&pool).await?;
        migrations::run(&pool, current, migrations::CURRENT_VERSION)
            .await
            .context("Database migration failed")?;

        debug!("Opened SQLite database at {}", path.display());
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    async fn create_inner(&self, expense: &NewExpense) -> anyhow::Result<ExpenseId> {
        let result = sqlx::query(
            "INSERT INTO expenses (date, amount, category, month, year) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(expense.date().format(DATE_FORMAT).to_string())
        .bind(expense.amount().value().to_string())
        .bind(expense.category().as_str())
        .bind(i64::from(expense.month().number()))
        .bind(expense.year())
        .execute(&self.pool)
        .await
        .context("Failed to insert expense")?;

        let id = ExpenseId::new(result.last_insert_rowid());
        debug!("Inserted expense {id}");
        Ok(id)
    }

    async fn fetch_all_inner(&self) -> anyhow::Result<Vec<Expense>> {
        let rows = sqlx::query("SELECT id, date, amount, category, month, year FROM expenses")
            .fetch_all(&self.pool)
            .await
            .context("Failed to query expenses")?;

        rows.iter().map(expense_from_row).collect()
    }
}

fn expense_from_row(row: &SqliteRow) -> anyhow::Result<Expense> {
    let id: i64 = row.try_get("id")?;
    let date: String = row.try_get("date")?;
    let amount: String = row.try_get("amount")?;
    let category: String = row.try_get("category")?;
    let month: i64 = row.try_get("month")?;
    let year: i64 = row.try_get("year")?;

    let month = u32::try_from(month).with_context(|| format!("Expense {id} has month {month}"))?;
    let year = i32::try_from(year).with_context(|| format!("Expense {id} has year {year}"))?;
    Expense::from_stored(id, &date, &amount, &category, month, year)
}

#[async_trait]
impl ExpenseStore for SqliteStore {
    async fn create(&self, expense: &NewExpense) -> Result<ExpenseId> {
        self.create_inner(expense)
            .await
            .pub_result(ErrorType::Storage)
    }

    async fn delete_by_id(&self, id: ExpenseId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete expense {id}"))
            .pub_result(ErrorType::Storage)?;

        let deleted = result.rows_affected() > 0;
        debug!("Delete expense {id}: found = {deleted}");
        Ok(deleted)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM expenses")
            .execute(&self.pool)
            .await
            .context("Failed to delete all expenses")
            .pub_result(ErrorType::Storage)?;

        debug!("Deleted {} expenses", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn fetch_all(&self) -> Result<Vec<Expense>> {
        self.fetch_all_inner()
            .await
            .pub_result(ErrorType::Storage)
    }
}
