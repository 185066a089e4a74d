use crate::error::{Error, Result};
use crate::model::{Amount, Category, Month};
use anyhow::ensure;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// The text format dates are parsed from and stored in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The store-assigned identifier of an expense.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ExpenseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(ExpenseId)
    }
}

/// A validated expense that has not been stored yet.
///
/// The only way to build one is through validation, so a store never receives a record with a
/// missing date, a non-positive amount or an empty category. `month` and `year` are derived from
/// `date` here and nowhere else.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct NewExpense {
    date: NaiveDate,
    amount: Amount,
    category: Category,
    month: Month,
    year: i32,
}

impl NewExpense {
    pub fn new(date: NaiveDate, amount: Amount, category: Category) -> Result<Self> {
        if !amount.is_positive() {
            return Err(Error::validation(format!(
                "amount must be greater than zero, got {amount}"
            )));
        }
        if amount > Amount::MAX {
            return Err(Error::validation(format!(
                "amount must be at most {}, got {amount}",
                Amount::MAX
            )));
        }
        Ok(Self {
            date,
            amount,
            category,
            month: Month::from(date),
            year: date.year(),
        })
    }

    /// Validates raw user input.
    pub fn parse(date: &str, amount: &str, category: &str) -> Result<Self> {
        let date = parse_date(date)?;
        let amount = parse_amount(amount)?;
        let category = Category::new(category)?;
        Self::new(date, amount, category)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// A stored expense.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Expense {
    id: ExpenseId,
    date: NaiveDate,
    amount: Amount,
    category: Category,
    month: Month,
    year: i32,
}

impl Expense {
    pub(crate) fn new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            amount: new.amount,
            category: new.category,
            month: new.month,
            year: new.year,
        }
    }

    /// Rebuilds an expense from its stored columns, checking that the redundant `month` and
    /// `year` columns still agree with `date`.
    pub(crate) fn from_stored(
        id: i64,
        date: &str,
        amount: &str,
        category: &str,
        month: u32,
        year: i32,
    ) -> anyhow::Result<Self> {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| anyhow::anyhow!("Expense {id} has an invalid date '{date}': {e}"))?;
        let amount = Amount::from_str(amount)
            .map_err(|e| anyhow::anyhow!("Expense {id} has an invalid amount '{amount}': {e}"))?;
        ensure!(
            amount <= Amount::MAX,
            "Expense {id} has an amount {amount} above the maximum {}",
            Amount::MAX
        );
        let category = Category::new(category)
            .map_err(|_| anyhow::anyhow!("Expense {id} has an empty category"))?;
        ensure!(
            month == date.month() && year == date.year(),
            "Expense {id} has month/year {month}/{year} which do not match its date {date}"
        );
        Ok(Self {
            id: ExpenseId(id),
            date,
            amount,
            category,
            month: Month::from(date),
            year,
        })
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// True when the expense falls in the given year and month.
    pub fn is_in(&self, year: i32, month: Month) -> bool {
        self.year == year && self.month == month
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::validation("date is required"));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        Error::validation(format!("date '{s}' is not a valid YYYY-MM-DD date: {e}"))
    })
}

fn parse_amount(s: &str) -> Result<Amount> {
    if s.trim().is_empty() {
        return Err(Error::validation("amount is required"));
    }
    Amount::from_str(s)
        .map_err(|e| Error::validation(format!("amount '{}' is not a number: {e}", s.trim())))
}
