use crate::model::{Amount, Expense, Month};
use chrono::{Datelike, NaiveDate};

/// Sum of the expenses recorded in the calendar month that contains `today`.
pub fn current_period_total(expenses: &[Expense], today: NaiveDate) -> Amount {
    period_total(expenses, Some(today.year()), Some(Month::from(today)))
}

/// Sum of the expenses matching an optional year and an optional month. With neither set this is
/// the sum of everything.
pub fn period_total(expenses: &[Expense], year: Option<i32>, month: Option<Month>) -> Amount {
    expenses
        .iter()
        .filter(|e| year.map_or(true, |y| e.year() == y))
        .filter(|e| month.map_or(true, |m| e.month() == m))
        .map(Expense::amount)
        .sum()
}
