//! Text formatting of command results for the terminal.

use crate::engine::{ChartSeries, FilterOptions, Listing, MonthGroup};
use crate::model::{Amount, Expense, Month};

const AMOUNT_WIDTH: usize = 12;

fn width(s: &str) -> usize {
    s.chars().count()
}

/// Format a listing as a table, one section per month when it is grouped.
pub fn format_listing(listing: &Listing, symbol: &str) -> String {
    if listing.is_empty() {
        return "No expenses found.".to_string();
    }

    let category_width = listing
        .expenses()
        .map(|e| width(e.category()))
        .max()
        .unwrap_or(8)
        .max(8);
    let id_width = listing
        .expenses()
        .map(|e| e.id().to_string().len())
        .max()
        .unwrap_or(2)
        .max(2);

    let mut output = String::new();
    match listing {
        Listing::Flat(expenses) => {
            push_expense_table(&mut output, expenses, symbol, id_width, category_width);
        }
        Listing::Grouped(groups) => {
            for (ix, group) in groups.iter().enumerate() {
                if ix > 0 {
                    output.push('\n');
                }
                push_group(&mut output, group, symbol, id_width, category_width);
            }
        }
    }

    let total: Amount = listing.expenses().map(Expense::amount).sum();
    let count = listing.len();
    output.push_str(&format!(
        "\n{} expense{}, total {}\n",
        count,
        if count == 1 { "" } else { "s" },
        total.to_money_string(symbol)
    ));
    output
}

fn push_group(
    output: &mut String,
    group: &MonthGroup,
    symbol: &str,
    id_width: usize,
    category_width: usize,
) {
    let subtotal: Amount = group.expenses.iter().map(Expense::amount).sum();
    output.push_str(&format!(
        "{} ({})\n",
        group.label(),
        subtotal.to_money_string(symbol)
    ));
    push_expense_table(output, &group.expenses, symbol, id_width, category_width);
}

fn push_expense_table(
    output: &mut String,
    expenses: &[Expense],
    symbol: &str,
    id_width: usize,
    category_width: usize,
) {
    output.push_str(&format!(
        "{:>id_width$}  {:<10}  {:<category_width$}  {:>AMOUNT_WIDTH$}\n",
        "ID", "Date", "Category", "Amount",
    ));
    output.push_str(&format!(
        "{:->id_width$}  {:-<10}  {:-<category_width$}  {:->AMOUNT_WIDTH$}\n",
        "", "", "", "",
    ));
    for expense in expenses {
        output.push_str(&format!(
            "{:>id_width$}  {:<10}  {:<category_width$}  {:>AMOUNT_WIDTH$}\n",
            expense.id(),
            expense.date(),
            expense.category().as_str(),
            expense.amount().to_money_string(symbol),
        ));
    }
}

/// Format the total of one month, e.g. `Total for March 2024: €52.50`.
pub fn format_total(year: i32, month: Month, total: Amount, symbol: &str) -> String {
    format!(
        "Total for {month} {year}: {}",
        total.to_money_string(symbol)
    )
}

/// Format the filter choices followed by the suggested categories.
pub fn format_options(options: &FilterOptions, suggested: &[&str]) -> String {
    let join = |items: Vec<String>| {
        if items.is_empty() {
            "(none)".to_string()
        } else {
            items.join(", ")
        }
    };
    let mut output = String::new();
    output.push_str(&format!(
        "Years:      {}\n",
        join(options.years.iter().map(i32::to_string).collect())
    ));
    output.push_str(&format!(
        "Months:     {}\n",
        join(options.months.iter().map(|m| m.short_name().to_string()).collect())
    ));
    output.push_str(&format!(
        "Categories: {}\n",
        join(options.categories.iter().map(ToString::to_string).collect())
    ));
    output.push_str(&format!(
        "Suggested:  {}\n",
        join(suggested.iter().map(ToString::to_string).collect())
    ));
    output
}

/// Format chart series as a table with one row per month and one column per series. Stacked
/// charts get a final column with the month total.
pub fn format_chart(chart: &ChartSeries, symbol: &str) -> String {
    let series = chart.series();
    if series.is_empty() {
        return "No expenses to chart.".to_string();
    }

    let stacked = matches!(chart, ChartSeries::Stacked(_));
    let mut headers: Vec<String> = series.iter().map(|s| s.label.clone()).collect();
    if stacked {
        headers.push("Total".to_string());
    }
    let widths: Vec<usize> = headers
        .iter()
        .map(|h| width(h).max(AMOUNT_WIDTH))
        .collect();

    let mut output = String::new();
    output.push_str(&format!("{:<5}", "Month"));
    for (header, w) in headers.iter().zip(&widths) {
        output.push_str(&format!("  {header:>w$}"));
    }
    output.push('\n');
    output.push_str(&format!("{:-<5}", ""));
    for w in &widths {
        output.push_str(&format!("  {:->w$}", ""));
    }
    output.push('\n');

    for month in Month::ALL {
        let mut cells: Vec<String> = series
            .iter()
            .map(|s| s.monthly.get(month).to_money_string(symbol))
            .collect();
        if stacked {
            cells.push(chart.month_total(month).to_money_string(symbol));
        }
        output.push_str(&format!("{:<5}", month.short_name()));
        for (cell, w) in cells.iter().zip(&widths) {
            output.push_str(&format!("  {cell:>w$}"));
        }
        output.push('\n');
    }

    output.push_str("\nColors: ");
    let legend: Vec<String> = series
        .iter()
        .map(|s| format!("{} {}", s.label, s.color))
        .collect();
    output.push_str(&legend.join(", "));
    output.push_str(&format!(
        "\nTotal: {}\n",
        chart.total().to_money_string(symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        chart_series, filter_options, filtered_listing, ChartFilter, ListingFilter,
    };
    use crate::model::{ExpenseId, NewExpense};
    use crate::palette::CategoryPalette;

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new(
                ExpenseId::new(1),
                NewExpense::parse("2024-03-05", "42.50", "Groceries").unwrap(),
            ),
            Expense::new(
                ExpenseId::new(2),
                NewExpense::parse("2024-03-20", "1200", "Rent").unwrap(),
            ),
        ]
    }

    #[test]
    fn test_format_flat_listing() {
        let listing = filtered_listing(&expenses(), &ListingFilter::default());
        let text = format_listing(&listing, "$");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Date"));
        assert!(lines[2].contains("2024-03-20"));
        assert!(lines[2].contains("$1,200.00"));
        assert!(lines[3].contains("Groceries"));
        assert!(text.contains("2 expenses, total $1,242.50"));
    }

    #[test]
    fn test_format_grouped_listing() {
        let listing = filtered_listing(&expenses(), &ListingFilter::new(None, Some(2024), None));
        let text = format_listing(&listing, "€");
        assert!(text.starts_with("March 2024 (€1,242.50)"));
    }

    #[test]
    fn test_format_empty_listing() {
        let listing = filtered_listing(&[], &ListingFilter::default());
        assert_eq!(format_listing(&listing, "€"), "No expenses found.");
    }

    #[test]
    fn test_format_total() {
        let total: Amount = "52.5".parse().unwrap();
        assert_eq!(
            format_total(2024, Month::March, total, "€"),
            "Total for March 2024: €52.50"
        );
    }

    #[test]
    fn test_format_options() {
        let text = format_options(&filter_options(&expenses()), &["Food"]);
        assert!(text.contains("Years:      2024"));
        assert!(text.contains("Jan, Feb"));
        assert!(text.contains("Categories: Groceries, Rent"));
        assert!(text.contains("Suggested:  Food"));

        let empty = format_options(&filter_options(&[]), &[]);
        assert!(empty.contains("Years:      (none)"));
    }

    #[test]
    fn test_format_stacked_chart() {
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&expenses(), &ChartFilter::default(), &mut palette);
        let text = format_chart(&chart, "€");
        let header = text.lines().next().unwrap();
        assert!(header.contains("Groceries"));
        assert!(header.contains("Rent"));
        assert!(header.contains("Total"));
        let march = text.lines().find(|l| l.starts_with("Mar")).unwrap();
        assert!(march.contains("€1,242.50"));
        assert!(text.contains("Groceries #4bc0c0"));
        assert!(text.ends_with("Total: €1,242.50\n"));
    }

    #[test]
    fn test_format_empty_chart() {
        let mut palette = CategoryPalette::new();
        let chart = chart_series(&[], &ChartFilter::default(), &mut palette);
        assert_eq!(format_chart(&chart, "€"), "No expenses to chart.");
    }
}
