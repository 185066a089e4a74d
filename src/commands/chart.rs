use crate::args::ChartArgs;
use crate::commands::Out;
use crate::display::format_chart;
use crate::engine::ChartSeries;
use crate::{Config, Result};

/// Monthly totals for one category, or stacked by category when `args` names none.
pub async fn chart(config: Config, args: ChartArgs) -> Result<Out<ChartSeries>> {
    let series = config.tracker().chart_series(&args.filter()).await?;
    let message = format_chart(&series, config.currency_symbol());
    Ok(Out::new(message, series))
}
