//! Types that represent the core data model, such as `Expense` and `Amount`.
mod amount;
pub mod category;
mod expense;
mod month;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use expense::{Expense, ExpenseId, NewExpense, DATE_FORMAT};
pub use month::Month;
