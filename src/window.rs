//! Date window resolution for `--since`, `--until` and `--year`.

use crate::error::{GitfetchError, Result};
use crate::model::DateRange;
use crate::util::week_start;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weeks shown before the current one when no start is given.
pub const DEFAULT_WEEKS: u64 = 52;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(GitfetchError::InvalidDate(format!(
                "Invalid range: since ({start}) is after until ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// The full weeks leading up to `end`, starting on a Sunday.
    pub fn trailing_year(end: NaiveDate) -> Self {
        let start = week_start(end)
            .checked_sub_days(Days::new(DEFAULT_WEEKS * 7))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    pub fn calendar_year(year: i32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(GitfetchError::InvalidDate(format!("Year out of range: {year}"))),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn widen_to(&mut self, date: NaiveDate) {
        if date < self.start {
            self.start = date;
        }
        if date > self.end {
            self.end = date;
        }
    }

    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.num_days())
    }

    /// Timestamp bounds covering every instant of the window's days in `tz`.
    pub fn to_range<Tz: TimeZone>(&self, tz: &Tz) -> DateRange {
        DateRange::new()
            .with_since(first_instant(tz, self.start))
            .with_until(last_instant(tz, self.end))
    }
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// The earliest instant of `date` in `tz`. When a DST change skips local
/// midnight this is the first wall-clock minute that exists.
fn first_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=MINUTES_PER_DAY)
        .find_map(|m| tz.from_local_datetime(&(midnight + TimeDelta::minutes(m))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// The latest instant of `date` in `tz`, stepping back over a skipped
/// end of day.
fn last_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let last = date.and_time(NaiveTime::MIN) + TimeDelta::seconds(86_399);
    (0..=MINUTES_PER_DAY)
        .find_map(|m| tz.from_local_datetime(&(last - TimeDelta::minutes(m))).latest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&last))
}

pub fn resolve_window(
    since: Option<&str>,
    until: Option<&str>,
    year: Option<i32>,
    today: NaiveDate,
) -> Result<DateWindow> {
    if let Some(year) = year {
        if since.is_some() || until.is_some() {
            return Err(GitfetchError::InvalidDate(
                "--year cannot be combined with --since or --until".to_string(),
            ));
        }
        return DateWindow::calendar_year(year);
    }

    let end = match until {
        Some(u) => parse_date(u, today)?,
        None => today,
    };
    let start = match since {
        Some(s) => parse_date(s, today)?,
        None => DateWindow::trailing_year(end).start,
    };

    DateWindow::new(start, end)
}

/// Accepts `YYYY-MM-DD`, RFC 3339, `today`/`yesterday`, or a relative
/// duration counted back from `today` (`90d`, `2 weeks ago`, `-3months`).
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    match input.to_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return days_before(today, 1, input),
        _ => {}
    }

    if let Some(duration) = parse_relative(input) {
        return days_before(today, duration.as_secs() / 86_400, input);
    }

    Err(GitfetchError::InvalidDate(format!(
        "Unrecognized date '{input}' (expected YYYY-MM-DD, RFC 3339, or a duration like 90d)"
    )))
}

fn days_before(today: NaiveDate, days: u64, input: &str) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(days))
        .ok_or_else(|| GitfetchError::InvalidDate(format!("Duration overflow for '{input}'")))
}

fn parse_relative(input: &str) -> Option<Duration> {
    let lowered = input.to_lowercase();
    let trimmed = lowered.strip_suffix("ago").unwrap_or(&lowered).trim();
    let trimmed = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    humantime::parse_duration(&compact).ok()
}
