use crate::window::DateWindow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// A single commit as read from history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
    pub lines_added: u32,
    pub lines_removed: u32,
}

/// Aggregated activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub commit_count: u32,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub lines_changed: u64,
}

impl DayBucket {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            commit_count: 0,
            lines_added: 0,
            lines_removed: 0,
            lines_changed: 0,
        }
    }

    pub fn add_commit(&mut self, commit: &Commit) {
        self.commit_count += 1;
        self.lines_added += commit.lines_added as u64;
        self.lines_removed += commit.lines_removed as u64;
        self.lines_changed += (commit.lines_added as u64) + (commit.lines_removed as u64);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_commits: u32,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub max_commits_in_day: u32,
}

/// Contiguous, zero-filled day buckets over a window plus summary counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionReport {
    pub window: DateWindow,
    pub today: NaiveDate,
    pub days: Vec<DayBucket>,
    pub summary: ReportSummary,
}

impl ContributionReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_commits == 0
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayBucket> {
        let first = self.days.first()?.date;
        let offset = (date - first).num_days();
        if offset < 0 {
            return None;
        }
        self.days.get(offset as usize)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub author: Option<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    #[serde(flatten)]
    pub report: ContributionReport,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring match against author name or email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorFilter {
    needle: String,
}

impl AuthorFilter {
    pub fn new(pattern: &str) -> Self {
        Self {
            needle: pattern.trim().to_lowercase(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.needle.is_empty()
            || name.to_lowercase().contains(&self.needle)
            || email.to_lowercase().contains(&self.needle)
    }
}
