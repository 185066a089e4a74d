//! Error types returned by the public API.
//!
//! Internally the crate works with `anyhow::Result` and attaches context as it goes. When a result
//! crosses into the public API it is classified with an [`ErrorType`] through [`IntoResult`].

use std::fmt::{Display, Formatter};
use thiserror::Error as ThisError;

/// The public error type.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The input was rejected before anything was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backing store could not complete an operation.
    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),

    /// The home directory or the configuration file is missing or invalid.
    #[error("Configuration error: {0:#}")]
    Config(anyhow::Error),

    /// A record with the given identifier does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn expense_not_found(id: impl Display) -> Self {
        Self::NotFound {
            entity: "Expense",
            id: id.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classifies an internal failure when it is converted into an [`Error`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorType {
    Storage,
    Config,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::Storage => f.write_str("storage"),
            ErrorType::Config => f.write_str("config"),
        }
    }
}

/// Converts an `anyhow::Result` into the public [`Result`].
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for anyhow::Result<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| match error_type {
            ErrorType::Storage => Error::Storage(e),
            ErrorType::Config => Error::Config(e),
        })
    }
}
