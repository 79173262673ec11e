// Calendar periods: inclusive date ranges and league months.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("date range starts after it ends: {start} > {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no such month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("expected a month as YYYY-MM, got `{input}`")]
    Parse { input: String },
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// Inclusive range of calendar dates. Used as the cache key for a query, so
/// two ranges are equal only when both ends match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every date in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// LeagueMonth
// ---------------------------------------------------------------------------

/// A calendar month of the season. Its date range is clamped so that the
/// opening month starts on the season opener rather than the 1st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeagueMonth {
    first: NaiveDate,
    last: NaiveDate,
}

impl LeagueMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        let invalid = || PeriodError::InvalidMonth { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;
        Ok(Self { first, last })
    }

    /// The month a date falls in.
    pub fn containing(date: NaiveDate) -> Result<Self, PeriodError> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// The following month, if representable.
    pub fn next(&self) -> Option<Self> {
        self.last
            .succ_opt()
            .and_then(|d| Self::containing(d).ok())
    }

    /// Date range covered by this month once the season has opened.
    ///
    /// Returns `None` when the whole month falls before the opener.
    pub fn range(&self, season_opener: NaiveDate) -> Option<DateRange> {
        let start = self.first.max(season_opener);
        DateRange::new(start, self.last).ok()
    }

    /// Human-readable title, e.g. "April 2025".
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for LeagueMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for LeagueMonth {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || PeriodError::Parse { input: s.to_string() };
        let (year, month) = s.trim().split_once('-').ok_or_else(parse_err)?;
        let year: i32 = year.parse().map_err(|_| parse_err())?;
        let month: u32 = month.parse().map_err(|_| parse_err())?;
        Self::new(year, month)
    }
}

/// Every month from the opener's month through `today`'s month, most recent
/// first. Empty before the season opens.
pub fn available_months(season_opener: NaiveDate, today: NaiveDate) -> Vec<LeagueMonth> {
    let mut months = months_between(season_opener, today);
    months.reverse();
    months
}

/// Every month from the opener's month through `through`, oldest first.
pub fn months_through(season_opener: NaiveDate, through: LeagueMonth) -> Vec<LeagueMonth> {
    months_between(season_opener, through.last_day())
}

fn months_between(from: NaiveDate, to: NaiveDate) -> Vec<LeagueMonth> {
    let mut months = Vec::new();
    if to < from {
        return months;
    }
    let (Ok(mut current), Ok(last)) = (LeagueMonth::containing(from), LeagueMonth::containing(to))
    else {
        return months;
    };
    while current <= last {
        months.push(current);
        match current.next() {
            Some(next) => current = next,
            None => break,
        }
    }
    months
}
