use super::streak::compute_streaks;
use crate::model::{Commit, ContributionReport, DayBucket, ReportSummary};
use crate::window::DateWindow;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Buckets commits by calendar day in a fixed time zone.
pub struct Aggregator<Tz: TimeZone> {
    tz: Tz,
    days: BTreeMap<NaiveDate, DayBucket>,
}

impl<Tz: TimeZone> Aggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            days: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, commit: &Commit) {
        let date = commit.timestamp.with_timezone(&self.tz).date_naive();
        self.days
            .entry(date)
            .or_insert_with(|| DayBucket::empty(date))
            .add_commit(commit);
    }

    pub fn commit_count(&self) -> u32 {
        self.days.values().map(|d| d.commit_count).sum()
    }

    /// Zero-fills every day of `window`, widened as needed so that no
    /// pushed commit falls outside it.
    pub fn finish(mut self, window: DateWindow, today: NaiveDate) -> ContributionReport {
        let mut window = window;
        if let Some((&first, _)) = self.days.first_key_value() {
            window.widen_to(first);
        }
        if let Some((&last, _)) = self.days.last_key_value() {
            window.widen_to(last);
        }

        let days: Vec<DayBucket> = window
            .days()
            .map(|date| self.days.remove(&date).unwrap_or_else(|| DayBucket::empty(date)))
            .collect();

        let streaks = compute_streaks(&days, today);
        let summary = ReportSummary {
            total_commits: days.iter().map(|d| d.commit_count).sum(),
            lines_added: days.iter().map(|d| d.lines_added).sum(),
            lines_removed: days.iter().map(|d| d.lines_removed).sum(),
            longest_streak: streaks.longest,
            current_streak: streaks.current,
            max_commits_in_day: days.iter().map(|d| d.commit_count).max().unwrap_or(0),
        };

        ContributionReport {
            window,
            today,
            days,
            summary,
        }
    }
}

pub fn aggregate<'a, I, Tz>(
    commits: I,
    window: DateWindow,
    today: NaiveDate,
    tz: Tz,
) -> ContributionReport
where
    I: IntoIterator<Item = &'a Commit>,
    Tz: TimeZone,
{
    let mut aggregator = Aggregator::new(tz);
    for commit in commits {
        aggregator.push(commit);
    }
    aggregator.finish(window, today)
}
