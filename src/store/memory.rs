use super::ExpenseStore;
use crate::model::{Expense, ExpenseId, NewExpense};
use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// An [`ExpenseStore`] that keeps expenses in process memory. Nothing survives the process.
///
/// `fetch_all` returns expenses in reverse insertion order so that callers relying on store order
/// are caught by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    expenses: BTreeMap<ExpenseId, Expense>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn create(&self, expense: &NewExpense) -> Result<ExpenseId> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let id = ExpenseId::new(inner.last_id);
        inner.expenses.insert(id, Expense::new(id, expense.clone()));
        Ok(id)
    }

    async fn delete_by_id(&self, id: ExpenseId) -> Result<bool> {
        Ok(self.inner.lock().await.expenses.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        let count = inner.expenses.len() as u64;
        inner.expenses.clear();
        Ok(count)
    }

    async fn fetch_all(&self) -> Result<Vec<Expense>> {
        Ok(self
            .inner
            .lock()
            .await
            .expenses
            .values()
            .rev()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_survive_delete_all() {
        let store = MemoryStore::new();
        let e = NewExpense::parse("2024-05-01", "3.20", "Coffee").unwrap();
        let a = store.create(&e).await.unwrap();
        let b = store.create(&e).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        let c = store.create(&e).await.unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_delete_missing_is_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_by_id(ExpenseId::new(99)).await.unwrap());
    }

    #[tokio::test]
    async fn test_fetch_all_is_not_insertion_ordered() {
        let store = MemoryStore::new();
        let e = NewExpense::parse("2024-05-01", "3.20", "Coffee").unwrap();
        let a = store.create(&e).await.unwrap();
        let b = store.create(&e).await.unwrap();
        let ids: Vec<_> = store
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(Expense::id)
            .collect();
        assert_eq!(ids, vec![b, a]);
    }
}
