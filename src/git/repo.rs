use super::walk::{CommitFilter, CommitWalk};
use crate::error::{GitfetchError, Result};
use gix::{discover, ObjectId, Repository};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`, or the current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path).map_err(|e| GitfetchError::RepositoryNotFound {
            path: repo_path.clone(),
            source: Box::new(e),
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!("Opened repository at {}", path.display());

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn inner(&self) -> &Repository {
        &self.repo
    }

    /// The commit HEAD points at, or `NoCommits` when HEAD is unborn.
    pub fn head_commit_id(&self) -> Result<ObjectId> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Err(GitfetchError::NoCommits);
        }
        let head_commit = head.peel_to_commit_in_place()?;
        Ok(head_commit.id)
    }

    /// Commits whose parents were cut off by a shallow clone. Empty for a
    /// complete repository.
    pub fn shallow_boundary(&self) -> Result<HashSet<ObjectId>> {
        let boundary: HashSet<ObjectId> = match self.repo.shallow_commits()? {
            Some(commits) => commits.iter().copied().collect(),
            None => HashSet::new(),
        };
        if !boundary.is_empty() {
            debug!("Shallow repository with {} boundary commits", boundary.len());
        }
        Ok(boundary)
    }

    /// A fresh walk over history reachable from HEAD. Each call starts over.
    pub fn commits(&self, filter: &CommitFilter) -> Result<CommitWalk<'_>> {
        let tip = self.head_commit_id()?;
        let boundary = self.shallow_boundary()?;
        Ok(CommitWalk::new(self, tip, filter.clone(), boundary))
    }
}
