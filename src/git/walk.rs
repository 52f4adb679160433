use super::diff::line_stats;
use super::repo::GitRepo;
use crate::error::{GitfetchError, Result};
use crate::model::{AuthorFilter, Commit, DateRange};
use chrono::{DateTime, Utc};
use gix::ObjectId;
use std::collections::HashSet;
use tracing::trace;

/// Which commits a [`CommitWalk`] yields.
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    pub range: DateRange,
    pub author: Option<AuthorFilter>,
    pub include_merges: bool,
}

impl CommitFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: Option<AuthorFilter>) -> Self {
        self.author = author;
        self
    }

    pub fn with_merges(mut self, include_merges: bool) -> Self {
        self.include_merges = include_merges;
        self
    }
}

/// Lazy depth-first walk over the ancestry of a commit. Every reachable
/// commit is visited once; those rejected by the filter are skipped but
/// their parents are still followed.
///
/// Commits in `boundary` (the shallow file of a shallow clone) have no
/// parents in the object store, so the walk stops there and diffs them
/// against the empty tree.
pub struct CommitWalk<'repo> {
    repo: &'repo GitRepo,
    filter: CommitFilter,
    stack: Vec<ObjectId>,
    seen: HashSet<ObjectId>,
    boundary: HashSet<ObjectId>,
}

impl<'repo> CommitWalk<'repo> {
    pub(crate) fn new(
        repo: &'repo GitRepo,
        tip: ObjectId,
        filter: CommitFilter,
        boundary: HashSet<ObjectId>,
    ) -> Self {
        Self {
            repo,
            filter,
            stack: vec![tip],
            seen: HashSet::new(),
            boundary,
        }
    }

    fn visit(&mut self, commit_id: ObjectId) -> Result<Option<Commit>> {
        let git_repo: &'repo GitRepo = self.repo;
        let repo = git_repo.inner();
        let commit = repo.find_commit(commit_id)?;
        let secs = commit.time()?.seconds;
        let timestamp = DateTime::<Utc>::from_timestamp(secs, 0)
            .ok_or_else(|| GitfetchError::GitRepo(format!("Invalid timestamp {secs} on {commit_id}")))?;

        let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
        let is_boundary = self.boundary.contains(&commit_id);
        if is_boundary {
            trace!("Stopping at shallow boundary {commit_id}");
        } else {
            // reversed so the first parent is popped next
            self.stack.extend(parents.iter().rev().copied());
        }

        if !self.filter.range.contains(&timestamp) {
            return Ok(None);
        }

        if !self.filter.include_merges && parents.len() > 1 {
            trace!("Skipping merge commit {commit_id}");
            return Ok(None);
        }

        let author = commit.author()?;
        let author_name = author.name.to_string();
        let author_email = author.email.to_string();
        if let Some(filter) = &self.filter.author {
            if !filter.matches(&author_name, &author_email) {
                return Ok(None);
            }
        }

        let diff_base = if is_boundary { None } else { parents.first().copied() };
        let stats = line_stats(repo, &commit, diff_base)?;

        Ok(Some(Commit {
            id: commit_id.to_string(),
            author_name,
            author_email,
            timestamp,
            lines_added: stats.added,
            lines_removed: stats.removed,
        }))
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_id) = self.stack.pop() {
            if !self.seen.insert(commit_id) {
                continue;
            }
            match self.visit(commit_id) {
                Ok(Some(commit)) => return Some(Ok(commit)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
