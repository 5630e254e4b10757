//! Time windows for entity evolution queries.
//!
//! Accepted forms (bounds inclusive):
//!
//! ```text
//! 2021                      the whole calendar year
//! 2020-2022                 Jan 1 2020 .. Dec 31 2022
//! 2020-03-01..2021-06-30    explicit dates; either side may be empty
//! last-30d | last-6w | last-12m | last-2y   relative to "today"
//! ```
//!
//! Relative windows are resolved against a caller-supplied date so results are
//! reproducible in tests.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Unit of a relative window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowUnit {
    Days,
    Weeks,
    Months,
    Years,
}

/// A parsed time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeWindow {
    Absolute {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Relative {
        amount: u32,
        unit: WindowUnit,
    },
}

/// Concrete inclusive bounds. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DateBounds {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateBounds {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

impl TimeWindow {
    /// Parse a window token.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the token matches no accepted form or
    /// its start falls after its end.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        let invalid = || {
            CoreError::Validation(format!(
                "invalid time window '{raw}'. Use YYYY, YYYY-YYYY, YYYY-MM-DD..YYYY-MM-DD, or last-N(d|w|m|y)"
            ))
        };

        let window = if let Some(rel) = raw.strip_prefix("last-") {
            parse_relative(rel).ok_or_else(invalid)?
        } else if let Some((start, end)) = raw.split_once("..") {
            let start = parse_optional_date(start).map_err(|()| invalid())?;
            let end = parse_optional_date(end).map_err(|()| invalid())?;
            if start.is_none() && end.is_none() {
                return Err(invalid());
            }
            Self::Absolute { start, end }
        } else if let Some(year) = parse_year(raw) {
            year_span(year, year).ok_or_else(invalid)?
        } else if let Some((a, b)) = raw.split_once('-') {
            let (a, b) = parse_year(a).zip(parse_year(b)).ok_or_else(invalid)?;
            year_span(a, b).ok_or_else(invalid)?
        } else {
            return Err(invalid());
        };

        if let Self::Absolute {
            start: Some(s),
            end: Some(e),
        } = window
        {
            if s > e {
                return Err(CoreError::Validation(format!(
                    "time window '{raw}' starts after it ends"
                )));
            }
        }
        Ok(window)
    }

    /// Resolve to concrete bounds, using `today` for relative windows.
    #[must_use]
    pub fn bounds(&self, today: NaiveDate) -> DateBounds {
        match *self {
            Self::Absolute { start, end } => DateBounds { start, end },
            Self::Relative { amount, unit } => {
                let start = match unit {
                    WindowUnit::Days => today.checked_sub_days(Days::new(u64::from(amount))),
                    WindowUnit::Weeks => {
                        today.checked_sub_days(Days::new(u64::from(amount) * 7))
                    }
                    WindowUnit::Months => today.checked_sub_months(Months::new(amount)),
                    WindowUnit::Years => {
                        today.checked_sub_months(Months::new(amount.saturating_mul(12)))
                    }
                };
                DateBounds {
                    start,
                    end: Some(today),
                }
            }
        }
    }
}

impl FromStr for TimeWindow {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute { start, end } => {
                if let Some(s) = start {
                    write!(f, "{s}")?;
                }
                f.write_str("..")?;
                if let Some(e) = end {
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            Self::Relative { amount, unit } => {
                let suffix = match unit {
                    WindowUnit::Days => 'd',
                    WindowUnit::Weeks => 'w',
                    WindowUnit::Months => 'm',
                    WindowUnit::Years => 'y',
                };
                write!(f, "last-{amount}{suffix}")
            }
        }
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn year_span(start_year: i32, end_year: i32) -> Option<TimeWindow> {
    let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?;
    Some(TimeWindow::Absolute {
        start: Some(start),
        end: Some(end),
    })
}

fn parse_optional_date(s: &str) -> Result<Option<NaiveDate>, ()> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ())
}

fn parse_relative(s: &str) -> Option<TimeWindow> {
    let unit = match s.chars().last()? {
        'd' => WindowUnit::Days,
        'w' => WindowUnit::Weeks,
        'm' => WindowUnit::Months,
        'y' => WindowUnit::Years,
        _ => return None,
    };
    let amount: u32 = s[..s.len() - 1].parse().ok()?;
    (amount > 0).then_some(TimeWindow::Relative { amount, unit })
}
