//! Delete command handlers.

use crate::args::{ClearArgs, DeleteArgs};
use crate::commands::Out;
use crate::model::ExpenseId;
use crate::{Config, Error, Result};

/// Deletes one expense by ID.
///
/// Unlike [`Tracker::remove_expense`](crate::Tracker::remove_expense), a missing ID is reported
/// as [`Error::NotFound`] so the user learns that nothing happened.
pub async fn delete(config: Config, args: DeleteArgs) -> Result<Out<ExpenseId>> {
    let id = args.id();
    if !config.tracker().remove_expense(id).await? {
        return Err(Error::expense_not_found(id));
    }
    Ok(Out::new(format!("Deleted expense {id}"), id))
}

/// Deletes every expense. Refuses to do anything unless `args.yes()` is set.
pub async fn clear(config: Config, args: ClearArgs) -> Result<Out<u64>> {
    if !args.yes() {
        return Err(Error::validation(
            "clear deletes every expense, pass --yes to confirm",
        ));
    }
    let count = config.tracker().remove_all_expenses().await?;
    let message = format!(
        "Deleted {} expense{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(Out::new(message, count))
}
