//! Read-only access to a local repository's commit history.

mod diff;
mod repo;
mod walk;

pub use diff::LineStats;
pub use repo::GitRepo;
pub use walk::{CommitFilter, CommitWalk};
