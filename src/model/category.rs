use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::Deref;

/// Category names offered to the user when recording an expense. Any other non-empty name is
/// accepted too.
pub const SUGGESTED: &[&str] = &[
    "Groceries",
    "Housing",
    "Utilities",
    "Transport",
    "Health",
    "Education",
    "Leisure",
    "Clothing",
    "Restaurants",
    "Other",
];

/// A non-empty, trimmed category label. Categories have no table of their own; the set of
/// categories is whatever distinct labels the stored expenses carry.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::validation("category must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for Category {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        let c = Category::new("  Groceries ").unwrap();
        assert_eq!(c.as_str(), "Groceries");
    }

    #[test]
    fn test_empty_is_validation_error() {
        assert!(Category::new("").unwrap_err().is_validation());
        assert!(Category::new(" \t ").unwrap_err().is_validation());
    }

    #[test]
    fn test_suggestions_are_valid_categories() {
        for name in SUGGESTED {
            assert_eq!(Category::new(name).unwrap().as_str(), *name);
        }
    }
}
