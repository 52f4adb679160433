use crate::model::DayBucket;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Streaks {
    pub longest: u32,
    pub current: u32,
}

/// Streaks over contiguous, date-ordered `days`.
///
/// A streak is a maximal run of consecutive days with at least one commit.
/// The current streak is the run ending on `today`, and is 0 when `today`
/// has no commits or lies outside `days`. Days after `today` are ignored
/// for the current streak but still count toward the longest.
pub fn compute_streaks(days: &[DayBucket], today: NaiveDate) -> Streaks {
    let mut longest = 0;
    let mut run = 0;
    for day in days {
        if day.commit_count > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let current = match today_index(days, today) {
        Some(idx) => days[..=idx]
            .iter()
            .rev()
            .take_while(|d| d.commit_count > 0)
            .count() as u32,
        None => 0,
    };

    Streaks { longest, current }
}

fn today_index(days: &[DayBucket], today: NaiveDate) -> Option<usize> {
    let first = days.first()?.date;
    let offset = (today - first).num_days();
    if offset < 0 || offset as usize >= days.len() {
        return None;
    }
    Some(offset as usize)
}
