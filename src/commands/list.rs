use crate::args::ListArgs;
use crate::commands::Out;
use crate::display::format_listing;
use crate::engine::Listing;
use crate::{Config, Result};

/// Lists the expenses matching `args`, most recent first.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Listing>> {
    let listing = config.tracker().filtered_listing(&args.filter()).await?;
    let message = format_listing(&listing, config.currency_symbol());
    Ok(Out::new(message, listing))
}
