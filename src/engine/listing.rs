use crate::model::{Expense, Month};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Which expenses to list. Unset fields match everything; set fields must all match.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ListingFilter {
    pub month: Option<Month>,
    pub year: Option<i32>,
    /// Matched exactly, including case.
    pub category: Option<String>,
}

impl ListingFilter {
    pub fn new(month: Option<Month>, year: Option<i32>, category: Option<String>) -> Self {
        Self {
            month,
            year,
            category,
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| expense.month() == m)
            && self.year.map_or(true, |y| expense.year() == y)
            && self
                .category
                .as_deref()
                .map_or(true, |c| expense.category().as_str() == c)
    }

    /// A year without a month lists the year month by month.
    fn groups_by_month(&self) -> bool {
        self.year.is_some() && self.month.is_none()
    }
}

/// The expenses of one calendar month within a grouped listing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: Month,
    pub expenses: Vec<Expense>,
}

impl MonthGroup {
    /// A heading such as `March 2024`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// The result of [`filtered_listing`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum Listing {
    Flat(Vec<Expense>),
    Grouped(Vec<MonthGroup>),
}

impl Listing {
    /// All listed expenses in listing order, regardless of grouping.
    pub fn expenses(&self) -> Box<dyn Iterator<Item = &Expense> + '_> {
        match self {
            Listing::Flat(expenses) => Box::new(expenses.iter()),
            Listing::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.expenses.iter())),
        }
    }

    pub fn len(&self) -> usize {
        self.expenses().count()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses().next().is_none()
    }
}

/// Lists the expenses matching `filter`, most recent date first. Expenses on the same date are
/// ordered by id, highest first, so the most recently recorded comes first.
///
/// When the filter names a year but no month, the result is grouped into one [`MonthGroup`] per
/// month present, most recent month first. Otherwise the listing is flat.
pub fn filtered_listing(expenses: &[Expense], filter: &ListingFilter) -> Listing {
    let mut listed: Vec<Expense> = expenses
        .iter()
        .filter(|e| filter.matches(e))
        .cloned()
        .collect();
    listed.sort_by_key(|e| Reverse((e.date(), e.id())));

    if !filter.groups_by_month() {
        return Listing::Flat(listed);
    }

    let mut groups: Vec<MonthGroup> = Vec::new();
    for expense in listed {
        match groups.last_mut() {
            Some(group) if expense.is_in(group.year, group.month) => group.expenses.push(expense),
            _ => groups.push(MonthGroup {
                year: expense.year(),
                month: expense.month(),
                expenses: vec![expense],
            }),
        }
    }
    Listing::Grouped(groups)
}
