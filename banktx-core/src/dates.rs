//! Year resolution for dates printed without one.
//!
//! Transaction rows carry bare `month/day` tokens; the statement period
//! header is the only place a year appears. For a period inside one
//! calendar year every token gets that year. For a period straddling a
//! year boundary (Dec -> Jan), a token whose month is numerically greater
//! than the end date's month belongs to the start year.
//!
//! The month comparison is a heuristic that is only verified for periods
//! spanning up to two calendar months; statements never cover more than
//! that in practice, so longer spans are left unspecified.

use chrono::{Datelike, NaiveDate};
use regex::Captures;

use crate::error::{Error, Result};
use crate::types::StatementPeriod;

/// How a profile assigns years to bare month/day tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateMode {
    /// Default to the period's end year; on a cross-year period, tokens
    /// with month greater than the end month fall back to the start year.
    CrossYear,
    /// Every token gets the period's start year. Used by the checking
    /// format, whose period header carries both full dates.
    StatementYear,
}

/// Split a `month/day` token into its numeric parts.
pub fn parse_month_day(token: &str) -> Result<(u32, u32)> {
    let bad = || Error::InvalidDate(token.to_string());
    let (m, d) = token.trim().split_once('/').ok_or_else(bad)?;
    let month: u32 = m.parse().map_err(|_| bad())?;
    let day: u32 = d.parse().map_err(|_| bad())?;
    Ok((month, day))
}

/// Resolve a bare `month/day` token into a full date against the
/// statement period.
pub fn resolve_month_day(
    token: &str,
    period: &StatementPeriod,
    mode: DateMode,
) -> Result<NaiveDate> {
    let (month, day) = parse_month_day(token)?;
    let year = match mode {
        DateMode::StatementYear => period.start.year(),
        DateMode::CrossYear => {
            if period.crosses_year() && month > period.end.month() {
                period.start.year()
            } else {
                period.end.year()
            }
        }
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::InvalidDate(token.to_string()))
}

fn month_number(name: &str) -> Option<u32> {
    name.parse::<chrono::Month>().ok().map(|m| m.number_from_month())
}

/// Per-institution grammar for the statement-period header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodGrammar {
    /// `September 12 - October 11, 2024`: only the end date carries a
    /// year; a start month greater than the end month means the period
    /// began the previous year.
    MonthDayRange,
    /// `Statement Period: Mar 21 2023-Apr 20 2023`: both dates are fully
    /// qualified.
    LabeledRange,
}

impl PeriodGrammar {
    /// Regex source recognizing this grammar's header line.
    pub fn recognizer(self) -> &'static str {
        match self {
            PeriodGrammar::MonthDayRange => r"^(\w+) (\d{1,2}) - (\w+) (\d{1,2}), (\d{4})$",
            PeriodGrammar::LabeledRange => {
                r"Statement Period: (\w+ \d{2} \d{4})-(\w+ \d{2} \d{4})"
            }
        }
    }

    /// Build the period from a line captured by [`Self::recognizer`].
    pub fn parse(self, caps: &Captures<'_>) -> Result<StatementPeriod> {
        let bad = || Error::InvalidPeriodFormat(caps[0].to_string());
        match self {
            PeriodGrammar::MonthDayRange => {
                let start_month = month_number(&caps[1]).ok_or_else(bad)?;
                let start_day: u32 = caps[2].parse().map_err(|_| bad())?;
                let end_month = month_number(&caps[3]).ok_or_else(bad)?;
                let end_day: u32 = caps[4].parse().map_err(|_| bad())?;
                let end_year: i32 = caps[5].parse().map_err(|_| bad())?;

                let start_year = if start_month > end_month {
                    end_year - 1
                } else {
                    end_year
                };

                let start =
                    NaiveDate::from_ymd_opt(start_year, start_month, start_day).ok_or_else(bad)?;
                let end =
                    NaiveDate::from_ymd_opt(end_year, end_month, end_day).ok_or_else(bad)?;
                StatementPeriod::new(start, end)
            }
            PeriodGrammar::LabeledRange => {
                let start =
                    NaiveDate::parse_from_str(&caps[1], "%b %d %Y").map_err(|_| bad())?;
                let end = NaiveDate::parse_from_str(&caps[2], "%b %d %Y").map_err(|_| bad())?;
                StatementPeriod::new(start, end)
            }
        }
    }
}
