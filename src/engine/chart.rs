use crate::model::{Amount, Category, Expense, Month};
use crate::palette::{CategoryPalette, Color, TOTAL_COLOR};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Index;

/// Which expenses a chart covers. With no category, the chart is stacked by category.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChartFilter {
    pub year: Option<i32>,
    /// Matched exactly, including case.
    pub category: Option<String>,
}

impl ChartFilter {
    pub fn new(year: Option<i32>, category: Option<String>) -> Self {
        Self { year, category }
    }
}

/// One amount per calendar month. Index 0 is January.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MonthlyTotals([Amount; 12]);

impl MonthlyTotals {
    fn add(&mut self, month: Month, amount: Amount) {
        self.0[month.index()] += amount;
    }

    pub fn get(&self, month: Month) -> Amount {
        self.0[month.index()]
    }

    /// Sum over all twelve months.
    pub fn total(&self) -> Amount {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[Amount; 12] {
        &self.0
    }

    /// `(month, amount)` pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (Month, Amount)> + '_ {
        Month::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Month> for MonthlyTotals {
    type Output = Amount;

    fn index(&self, month: Month) -> &Self::Output {
        &self.0[month.index()]
    }
}

/// A labelled, colored row of monthly totals.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub color: Color,
    pub monthly: MonthlyTotals,
}

/// The result of [`chart_series`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "series", rename_all = "snake_case")]
pub enum ChartSeries {
    /// A single category.
    Single(Series),
    /// One series per category, in ascending category order.
    Stacked(Vec<Series>),
}

impl ChartSeries {
    pub fn series(&self) -> &[Series] {
        match self {
            ChartSeries::Single(series) => std::slice::from_ref(series),
            ChartSeries::Stacked(series) => series,
        }
    }

    /// The height of the full bar for `month`.
    pub fn month_total(&self, month: Month) -> Amount {
        self.series().iter().map(|s| s.monthly.get(month)).sum()
    }

    /// Per-month totals across all series.
    pub fn month_totals(&self) -> MonthlyTotals {
        let mut totals = MonthlyTotals::default();
        for series in self.series() {
            for (month, amount) in series.monthly.iter() {
                totals.add(month, amount);
            }
        }
        totals
    }

    /// Sum over every series and month.
    pub fn total(&self) -> Amount {
        self.month_totals().total()
    }
}

/// Aggregates expenses into monthly totals for charting.
///
/// - With `filter.category` set: one series holding that category's monthly sums (within
///   `filter.year` if set).
/// - Without: one series per category present within `filter.year`, categories ascending. For
///   any month, the series sum to the same total as
///   [`period_total`](crate::engine::period_total) for that year and month.
///
/// Each series is colored by `palette`, which assigns colors to categories it has not seen yet.
pub fn chart_series(
    expenses: &[Expense],
    filter: &ChartFilter,
    palette: &mut CategoryPalette,
) -> ChartSeries {
    let in_year = expenses
        .iter()
        .filter(|e| filter.year.map_or(true, |y| e.year() == y));

    match filter.category.as_deref() {
        Some(category) => {
            let mut monthly = MonthlyTotals::default();
            for expense in in_year.filter(|e| e.category().as_str() == category) {
                monthly.add(expense.month(), expense.amount());
            }
            let color = match Category::new(category) {
                Ok(category) => palette.color_for(&category),
                Err(_) => TOTAL_COLOR,
            };
            ChartSeries::Single(Series {
                label: category.to_string(),
                color,
                monthly,
            })
        }
        None => {
            let mut by_category: BTreeMap<&Category, MonthlyTotals> = BTreeMap::new();
            for expense in in_year {
                by_category
                    .entry(expense.category())
                    .or_default()
                    .add(expense.month(), expense.amount());
            }
            let series = by_category
                .into_iter()
                .map(|(category, monthly)| Series {
                    label: category.to_string(),
                    color: palette.color_for(category),
                    monthly,
                })
                .collect();
            ChartSeries::Stacked(series)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{expense, sample};
    use crate::engine::period_total;

    #[test]
    fn test_single_category() {
        let mut palette = CategoryPalette::new();
        let filter = ChartFilter::new(Some(2024), Some("Groceries".into()));
        let chart = chart_series(&sample(), &filter, &mut palette);
        let ChartSeries::Single(series) = &chart else {
            panic!("expected a single series");
        };
        assert_eq!(series.label, "Groceries");
        assert_eq!(series.monthly[Month::January].to_string(), "5.25");
        assert_eq!(series.monthly[Month::March].to_string(), "45.60");
        assert_eq!(series.monthly[Month::December], Amount::ZERO);
        assert_eq!(series.monthly.total().to_string(), "50.85");
    }

    #[test]
    fn test_single_category_without_matches_is_all_zero() {
        let mut palette = CategoryPalette::new();
        let filter = ChartFilter::new(Some(2024), Some("Housing".into()));
        let chart = chart_series(&sample(), &filter, &mut palette);
        assert_eq!(chart.series().len(), 1);
        assert_eq!(chart.total(), Amount::ZERO);
        assert!(chart.series()[0].monthly.iter().all(|(_, a)| a.is_zero()));
    }

    #[test]
    fn test_stacked_categories_are_sorted() {
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&sample(), &ChartFilter::new(Some(2024), None), &mut palette);
        let ChartSeries::Stacked(series) = &chart else {
            panic!("expected stacked series");
        };
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        // Housing only appears in 2023.
        assert_eq!(labels, vec!["Groceries", "Transport"]);
    }

    #[test]
    fn test_march_groceries_and_transport() {
        let expenses = vec![
            expense(1, "2024-03-05", "42.50", "Groceries"),
            expense(2, "2024-03-20", "10.00", "Transport"),
        ];
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&expenses, &ChartFilter::new(Some(2024), None), &mut palette);
        assert_eq!(chart.series().len(), 2);
        assert_eq!(chart.month_total(Month::March).to_string(), "52.50");
        for month in Month::ALL.into_iter().filter(|m| *m != Month::March) {
            assert_eq!(chart.month_total(month), Amount::ZERO, "{month}");
        }
    }

    #[test]
    fn test_stacked_matches_period_totals() {
        let expenses = sample();
        for year in [None, Some(2023), Some(2024), Some(2030)] {
            let mut palette = CategoryPalette::new();
            let chart = chart_series(&expenses, &ChartFilter::new(year, None), &mut palette);
            for month in Month::ALL {
                assert_eq!(
                    chart.month_total(month),
                    period_total(&expenses, year, Some(month)),
                    "{year:?} {month}"
                );
            }
            assert_eq!(chart.total(), period_total(&expenses, year, None));
        }
    }

    #[test]
    fn test_all_years_folds_months_together() {
        let expenses = vec![
            expense(1, "2023-05-01", "1.50", "Books"),
            expense(2, "2024-05-09", "2.25", "Books"),
        ];
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&expenses, &ChartFilter::default(), &mut palette);
        assert_eq!(chart.month_total(Month::May).to_string(), "3.75");
    }

    #[test]
    fn test_colors_are_stable_across_calls() {
        let expenses = sample();
        let mut palette = CategoryPalette::new();

        // Transport is seen first through the single-category chart.
        let single = chart_series(
            &expenses,
            &ChartFilter::new(None, Some("Transport".into())),
            &mut palette,
        );
        let transport = single.series()[0].color;

        let stacked = chart_series(&expenses, &ChartFilter::default(), &mut palette);
        let colors: BTreeMap<&str, Color> = stacked
            .series()
            .iter()
            .map(|s| (s.label.as_str(), s.color))
            .collect();
        assert_eq!(colors["Transport"], transport);
        assert_ne!(colors["Groceries"], transport);
        assert_ne!(colors["Housing"], colors["Groceries"]);

        let again = chart_series(&expenses, &ChartFilter::default(), &mut palette);
        assert_eq!(again, stacked);
    }

    #[test]
    fn test_empty_stacked() {
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&[], &ChartFilter::default(), &mut palette);
        assert_eq!(chart, ChartSeries::Stacked(Vec::new()));
        assert_eq!(chart.total(), Amount::ZERO);
        assert!(palette.is_empty());
    }
}
