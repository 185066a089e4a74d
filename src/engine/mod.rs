//! Pure derivations over a set of expenses.
//!
//! Nothing in here touches the store or suspends. Every function takes the full set of expenses,
//! in whatever order the store returned them, and recomputes its view from scratch.

mod chart;
mod listing;
mod options;
mod totals;

pub use chart::{chart_series, ChartFilter, ChartSeries, MonthlyTotals, Series};
pub use listing::{filtered_listing, Listing, ListingFilter, MonthGroup};
pub use options::{filter_options, FilterOptions};
pub use totals::{current_period_total, period_total};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Expense, ExpenseId, NewExpense};

    /// Builds a stored expense without going through a store.
    pub(crate) fn expense(id: i64, date: &str, amount: &str, category: &str) -> Expense {
        Expense::new(
            ExpenseId::new(id),
            NewExpense::parse(date, amount, category).unwrap(),
        )
    }

    /// A spread of expenses over two years and three categories, deliberately out of order.
    pub(crate) fn sample() -> Vec<Expense> {
        vec![
            expense(4, "2024-03-20", "10.00", "Transport"),
            expense(1, "2023-11-02", "99.90", "Housing"),
            expense(7, "2024-01-15", "5.25", "Groceries"),
            expense(2, "2024-03-05", "42.50", "Groceries"),
            expense(6, "2024-03-20", "3.10", "Groceries"),
            expense(3, "2023-12-24", "60.00", "Groceries"),
            expense(5, "2024-01-31", "18.75", "Transport"),
        ]
    }
}
