use crate::commands::Out;
use crate::display::format_total;
use crate::model::{Amount, Month};
use crate::{Config, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// The total of one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub year: i32,
    pub month: Month,
    pub total: Amount,
}

/// Sums the expenses of the month that contains `today`.
pub async fn total(config: Config, today: NaiveDate) -> Result<Out<PeriodTotal>> {
    let total = config.tracker().current_period_total(today).await?;
    let period = PeriodTotal {
        year: today.year(),
        month: Month::from(today),
        total,
    };
    let message = format_total(
        period.year,
        period.month,
        period.total,
        config.currency_symbol(),
    );
    Ok(Out::new(message, period))
}
