use super::aggregate::Aggregator;
use crate::error::{GitfetchError, Result};
use crate::git::{CommitFilter, GitRepo};
use crate::model::{AuthorFilter, ContributionReport};
use crate::window::DateWindow;
use chrono::{NaiveDate, TimeZone};
use indicatif::ProgressBar;
use tracing::{debug, info};

/// What to read from the repository.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub window: DateWindow,
    pub author: Option<AuthorFilter>,
    pub include_merges: bool,
}

/// Walks history once and aggregates it into a report over the request's
/// window. A repository without commits yields an empty report.
pub fn collect_report<Tz: TimeZone>(
    repo: &GitRepo,
    request: &ReportRequest,
    today: NaiveDate,
    tz: Tz,
    pb: &ProgressBar,
) -> Result<ContributionReport> {
    let filter = CommitFilter::new(request.window.to_range(&tz))
        .with_author(request.author.clone())
        .with_merges(request.include_merges);
    let mut aggregator = Aggregator::new(tz);

    let walk = match repo.commits(&filter) {
        Ok(walk) => walk,
        Err(GitfetchError::NoCommits) => {
            info!("Repository at {} has no commits", repo.path().display());
            return Ok(aggregator.finish(request.window, today));
        }
        Err(e) => return Err(e),
    };

    pb.set_message("Collecting commits...");
    for commit in walk {
        let commit = commit?;
        aggregator.push(&commit);
        pb.inc(1);
    }
    pb.finish_and_clear();

    debug!("Aggregated {} commits", aggregator.commit_count());
    Ok(aggregator.finish(request.window, today))
}
