//! ISO year-week identifiers and month/week calendar helpers
//!
//! Every record and estimate is bucketed by an ISO-8601 calendar week,
//! written as "YYYY-WW" (e.g. "2025-09"). This module owns parsing,
//! formatting and the small amount of calendar arithmetic the reports need.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ISO-8601 calendar week, e.g. 2025-09
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearWeek {
    pub year: i32,
    pub week: u32,
}

impl YearWeek {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// The ISO week containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Resolve wizard-style week input: the literal "current" (today's week)
    /// or an explicit "YYYY-WW" string
    pub fn resolve(input: &str, today: NaiveDate) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("current") {
            Ok(Self::from_date(today))
        } else {
            input.parse()
        }
    }
}

impl std::str::FromStr for YearWeek {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidWeek(format!("'{}' (expected YYYY-WW)", s));

        let (year, week) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;

        if !(1..=53).contains(&week) {
            return Err(Error::InvalidWeek(format!(
                "'{}' (week number must be 1-53)",
                s
            )));
        }

        Ok(Self { year, week })
    }
}

impl std::fmt::Display for YearWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.week)
    }
}

/// One calendar week of a month: the span of days it covers and its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWeek {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub week: YearWeek,
}

/// Week ranges of the month containing `today`, Monday-started.
///
/// A Sunday closes each week; a trailing partial week is closed by the
/// month's last day. Week labels come from the closing day, so a week
/// spilling into the next month keeps the label of its last in-month day.
pub fn weeks_of_month(today: NaiveDate) -> Vec<MonthWeek> {
    let first = today.with_day(1).expect("day 1 always valid");
    let last = last_day_of_month(first);

    let mut weeks = Vec::new();
    let mut start: Option<NaiveDate> = None;

    let mut day = first;
    while day <= last {
        if start.is_none() {
            start = Some(day);
        }
        if day.weekday() == Weekday::Sun {
            weeks.push(MonthWeek {
                start: start.take().expect("start set above"),
                end: day,
                week: YearWeek::from_date(day),
            });
        }
        day = day.checked_add_days(Days::new(1)).expect("in-range date");
    }

    if let Some(start) = start {
        weeks.push(MonthWeek {
            start,
            end: last,
            week: YearWeek::from_date(last),
        });
    }

    weeks
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("month start always valid")
        .pred_opt()
        .expect("never before year zero")
}
