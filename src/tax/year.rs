use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// UK tax year, 6 April to 5 April, identified by the year it ends in.
/// `TaxYear(2025)` is 2024/25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaxYear(pub i32);

impl TaxYear {
    pub fn from_date(date: NaiveDate) -> Self {
        if (date.month(), date.day()) >= (4, 6) {
            TaxYear(date.year() + 1)
        } else {
            TaxYear(date.year())
        }
    }

    /// Tax year containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// "2024/25"
    pub fn display(&self) -> String {
        format!("{}/{:02}", self.0 - 1, self.0 % 100)
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for TaxYear {
    type Err = String;

    /// Accepts the end year ("2025") or the span form ("2024/25").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid tax year '{s}', expected e.g. 2025 or 2024/25");
        match s.split_once('/') {
            None => s.parse().map(TaxYear).map_err(|_| invalid()),
            Some((start, end)) => {
                let start: i32 = start.parse().map_err(|_| invalid())?;
                let end: i32 = end.parse().map_err(|_| invalid())?;
                if end.rem_euclid(100) != (start + 1).rem_euclid(100) || end >= 100 {
                    return Err(invalid());
                }
                Ok(TaxYear(start + 1))
            }
        }
    }
}
