//! The record store that expenses are persisted in.
//!
//! [`ExpenseStore`] abstracts over the backing store so that the [`Tracker`](crate::Tracker) can
//! work with the SQLite database or with the in-memory store used in tests.

mod memory;
mod migrations;
mod sqlite;

use crate::model::{Expense, ExpenseId, NewExpense};
use crate::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Persistent storage of expenses.
///
/// Each operation runs in its own atomic transaction. A failed operation surfaces as
/// [`Error::Storage`](crate::Error::Storage) and leaves previously committed records intact.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Stores a new expense and returns the identifier assigned to it. Identifiers increase
    /// monotonically and are never reused within the lifetime of the store.
    async fn create(&self, expense: &NewExpense) -> Result<ExpenseId>;

    /// Deletes one expense. Returns `false` if no expense has this `id`.
    async fn delete_by_id(&self, id: ExpenseId) -> Result<bool>;

    /// Deletes every expense and returns how many were removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Returns every stored expense, in no particular order.
    async fn fetch_all(&self) -> Result<Vec<Expense>>;
}
