use crate::model::{Category, Expense, Month};
use serde::Serialize;
use std::collections::BTreeSet;

/// The values a user can pick from when filtering.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Distinct years present, ascending.
    pub years: Vec<i32>,
    /// All twelve months, whatever the data.
    pub months: Vec<Month>,
    /// Distinct categories present, ascending.
    pub categories: Vec<Category>,
}

/// Derives the filter choices from the expenses currently stored.
pub fn filter_options(expenses: &[Expense]) -> FilterOptions {
    let years: BTreeSet<i32> = expenses.iter().map(Expense::year).collect();
    let categories: BTreeSet<&Category> = expenses.iter().map(Expense::category).collect();
    FilterOptions {
        years: years.into_iter().collect(),
        months: Month::ALL.to_vec(),
        categories: categories.into_iter().cloned().collect(),
    }
}
