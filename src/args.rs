//! These structs provide the CLI interface for the expenses CLI.

use crate::engine::{ChartFilter, ListingFilter};
use crate::model::{ExpenseId, Month};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expenses: Record what you spend and see where it goes.
///
/// Expenses are kept in a local SQLite database. Each expense has a date, an amount and a
/// category. You can list them filtered by month, year and category, see this month's total, and
/// chart monthly totals for one category or stacked across all of them.
///
/// Run `expenses init` once to create the data directory.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory, the configuration file and the database.
    ///
    /// By default the data directory is $HOME/expenses. Pass --home to put it somewhere else, and
    /// pass the same --home to every other command.
    Init,
    /// Record an expense.
    Add(AddArgs),
    /// Delete one expense by its ID.
    Delete(DeleteArgs),
    /// Delete every expense.
    Clear(ClearArgs),
    /// List expenses, most recent first.
    ///
    /// With --year and no --month the list is grouped by month.
    List(ListArgs),
    /// Show the total spent in the current month.
    Total,
    /// Show the years, months and categories that can be used as filters.
    Options,
    /// Show monthly totals for one category, or for every category stacked.
    Chart(ChartArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for its syntax.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the database and configuration are held. Defaults to ~/expenses
    #[arg(long, default_value_t = default_expenses_home())]
    home: DisplayPath,

    /// How to print results: "table" or "json"
    #[arg(long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf, format: OutputFormat) -> Self {
        Self {
            log_level,
            home: home.into(),
            format,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// The output format of a command.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Table,
    /// The structured result as pretty-printed JSON.
    Json,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// (Not shown): Args for the `expenses add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The amount spent, e.g. 42.50. Must be greater than zero.
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// The category, e.g. Groceries. See `expenses options` for suggestions.
    #[arg(long)]
    category: String,

    /// The date of the expense as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<String>,
}

impl AddArgs {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        date: Option<impl Into<String>>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            date: date.map(Into::into),
        }
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// (Not shown): Args for the `expenses delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The ID of the expense, as shown by `expenses list`.
    id: ExpenseId,
}

impl DeleteArgs {
    pub fn new(id: ExpenseId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }
}

/// (Not shown): Args for the `expenses clear` command.
#[derive(Debug, Parser, Clone)]
pub struct ClearArgs {
    /// Confirms that every expense should be deleted.
    #[arg(long)]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// (Not shown): Args for the `expenses list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    /// Only list this month: a number (3), a name (march) or an abbreviation (mar).
    #[arg(long)]
    month: Option<Month>,

    /// Only list this year.
    #[arg(long)]
    year: Option<i32>,

    /// Only list this category. The match is exact.
    #[arg(long)]
    category: Option<String>,
}

impl ListArgs {
    pub fn new(month: Option<Month>, year: Option<i32>, category: Option<String>) -> Self {
        Self {
            month,
            year,
            category,
        }
    }

    pub fn filter(&self) -> ListingFilter {
        ListingFilter::new(self.month, self.year, self.category.clone())
    }
}

/// (Not shown): Args for the `expenses chart` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ChartArgs {
    /// Only chart this year. Without it, the same month of every year is added together.
    #[arg(long)]
    year: Option<i32>,

    /// Chart only this category. Without it, every category is charted, stacked.
    #[arg(long)]
    category: Option<String>,
}

impl ChartArgs {
    pub fn new(year: Option<i32>, category: Option<String>) -> Self {
        Self { year, category }
    }

    pub fn filter(&self) -> ChartFilter {
        ChartFilter::new(self.year, self.category.clone())
    }
}

fn default_expenses_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expenses"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home instead of relying on the default home directory. If you \
                continue using the program right now, you may have problems!",
            );
            PathBuf::from("expenses")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
