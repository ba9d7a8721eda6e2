//! Date ranges and quick-select period presets

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{SeriesError, SeriesResult};

/// An inclusive calendar date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> SeriesResult<Self> {
        if start > end {
            return Err(SeriesError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range covered by `period`, ending at `end`
    pub fn for_period(period: Period, end: NaiveDate) -> Self {
        Self {
            start: period.start_from(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Quick-select lookback periods offered by the date picker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Period {
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
}

impl Period {
    /// Get all periods in display order
    pub fn all() -> &'static [Period] {
        &[
            Period::OneYear,
            Period::ThreeYears,
            Period::FiveYears,
            Period::TenYears,
        ]
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneYear => "1Y",
            Period::ThreeYears => "3Y",
            Period::FiveYears => "5Y",
            Period::TenYears => "10Y",
        }
    }

    /// Length in calendar days (365 per year, leap days ignored)
    pub fn days(&self) -> i64 {
        match self {
            Period::OneYear => 365,
            Period::ThreeYears => 365 * 3,
            Period::FiveYears => 365 * 5,
            Period::TenYears => 365 * 10,
        }
    }

    /// Start date of the period ending at `end`
    pub fn start_from(&self, end: NaiveDate) -> NaiveDate {
        end - Duration::days(self.days())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Period {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1Y" => Ok(Period::OneYear),
            "3Y" => Ok(Period::ThreeYears),
            "5Y" => Ok(Period::FiveYears),
            "10Y" => Ok(Period::TenYears),
            _ => Err(SeriesError::UnknownPeriod(s.to_string())),
        }
    }
}
