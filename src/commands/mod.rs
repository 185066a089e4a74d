//! Command handlers for the expenses CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod add;
mod chart;
mod delete;
mod init;
mod list;
mod options;
mod total;

use crate::args::OutputFormat;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error};

pub use add::add;
pub use chart::chart;
pub use delete::{clear, delete};
pub use init::init;
pub use list::list;
pub use options::{options, Options};
pub use total::{total, PeriodTotal};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data, so that either can be printed depending on `--format`.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print to stdout: the message for [`OutputFormat::Table`], the structured data as JSON for
    /// [`OutputFormat::Json`].
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Table => println!("{}", self.message),
            OutputFormat::Json => match self.to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Unable to serialize the command output: {e}"),
            },
        }
    }

    /// The structured data as pretty JSON, or the whole `Out` when there is none.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let json = match self.structure() {
            Some(structure) => serde_json::to_string_pretty(structure)?,
            None => serde_json::to_string_pretty(self)?,
        };
        debug!("Command output:\n\n{json}\n\n");
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_prefers_structure() {
        let out = Out::new("Deleted 2 expenses", 2u64);
        assert_eq!(out.to_json().unwrap(), "2");
    }

    #[test]
    fn test_to_json_message_only() {
        let out: Out<()> = "done".into();
        let json = out.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["message"], "done");
        assert!(value["structure"].is_null());
    }
}
