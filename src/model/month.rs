use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month. `January` is month number 1.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Returns the month for a number in `1..=12`.
    pub fn from_number(n: u32) -> Option<Month> {
        n.checked_sub(1)
            .and_then(|ix| Month::ALL.get(ix as usize))
            .copied()
    }

    /// The month number in `1..=12`.
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Zero-based position, suitable for indexing a twelve-element array.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    /// Accepts `3`, `03`, `march`, `March` or `mar`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Month::from_number(n)
                .ok_or_else(|| format!("Month number must be between 1 and 12, got {n}"));
        }
        let lower = s.to_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| m.name().to_lowercase() == lower || m.short_name().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown month '{s}'"))
    }
}

impl From<NaiveDate> for Month {
    /// The month `date` falls in.
    fn from(date: NaiveDate) -> Self {
        Month::ALL[date.month0() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_round_trip() {
        for (ix, month) in Month::ALL.into_iter().enumerate() {
            assert_eq!(month.index(), ix);
            assert_eq!(month.number(), ix as u32 + 1);
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
    }

    #[test]
    fn test_out_of_range_numbers() {
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::from_str("3").unwrap(), Month::March);
        assert_eq!(Month::from_str("03").unwrap(), Month::March);
        assert_eq!(Month::from_str("march").unwrap(), Month::March);
        assert_eq!(Month::from_str("SEP").unwrap(), Month::September);
        assert!(Month::from_str("13").is_err());
        assert!(Month::from_str("smarch").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Month::December.to_string(), "December");
        assert_eq!(Month::May.short_name(), "May");
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 31).unwrap();
        assert_eq!(Month::from(date), Month::October);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Month::from(date), Month::January);
    }
}
