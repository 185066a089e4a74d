use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::{Expense, NewExpense, DATE_FORMAT};
use crate::{Config, Result};
use chrono::NaiveDate;

/// Validates and records one expense. `today` is used when `args` has no date.
pub async fn add(config: Config, args: AddArgs, today: NaiveDate) -> Result<Out<Expense>> {
    let date = match args.date() {
        Some(date) => date.to_string(),
        None => today.format(DATE_FORMAT).to_string(),
    };
    let new = NewExpense::parse(&date, args.amount(), args.category())?;
    let id = config.tracker().record(&new).await?;
    let expense = Expense::new(id, new);

    let message = format!(
        "Recorded expense {}: {} for {} on {}",
        id,
        expense.amount().to_money_string(config.currency_symbol()),
        expense.category(),
        expense.date()
    );
    Ok(Out::new(message, expense))
}
