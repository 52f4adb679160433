use crate::error::Result;
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use tracing::debug;

/// Bytes inspected when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 8192;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub added: u32,
    pub removed: u32,
}

impl LineStats {
    fn add(&mut self, (added, removed): (u32, u32)) {
        self.added += added;
        self.removed += removed;
    }
}

/// Lines added and removed by `commit` relative to `parent`, or to the
/// empty tree for a root commit.
pub(crate) fn line_stats(
    repo: &Repository,
    commit: &gix::Commit<'_>,
    parent: Option<ObjectId>,
) -> Result<LineStats> {
    let commit_tree = commit.tree()?;

    let changes: Vec<ChangeDetached> = match parent {
        Some(parent_id) => {
            let parent_tree = repo.find_commit(parent_id)?.tree()?;
            repo.diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
        }
        None => repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
    };

    let mut stats = LineStats::default();
    for change in changes {
        stats.add(change_lines(repo, change));
    }
    Ok(stats)
}

fn change_lines(repo: &Repository, change: ChangeDetached) -> (u32, u32) {
    match change {
        ChangeDetached::Addition { id, .. } => match find_blob(repo, id) {
            Some(obj) if !is_binary(&obj.data) => (count_lines(&obj.data), 0),
            _ => (0, 0),
        },
        ChangeDetached::Deletion { id, .. } => match find_blob(repo, id) {
            Some(obj) if !is_binary(&obj.data) => (0, count_lines(&obj.data)),
            _ => (0, 0),
        },
        ChangeDetached::Modification { previous_id, id, .. } => blob_delta(repo, previous_id, id),
        ChangeDetached::Rewrite {
            source_id, id, copy, ..
        } => {
            let (added, removed) = blob_delta(repo, source_id, id);
            // a copy leaves its source in place
            if copy {
                (added, 0)
            } else {
                (added, removed)
            }
        }
    }
}

/// Blobs absent from the object store (partial clones) count as empty.
fn find_blob(repo: &Repository, id: ObjectId) -> Option<gix::Object<'_>> {
    match repo.find_object(id) {
        Ok(obj) => Some(obj),
        Err(e) => {
            debug!("Skipping line count for blob {id}: {e}");
            None
        }
    }
}

fn blob_delta(repo: &Repository, old_id: ObjectId, new_id: ObjectId) -> (u32, u32) {
    match (find_blob(repo, old_id), find_blob(repo, new_id)) {
        (Some(old), Some(new)) if !is_binary(&old.data) && !is_binary(&new.data) => {
            line_delta(&String::from_utf8_lossy(&old.data), &String::from_utf8_lossy(&new.data))
        }
        _ => (0, 0),
    }
}

pub(crate) fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

fn count_lines(data: &[u8]) -> u32 {
    String::from_utf8_lossy(data).lines().count() as u32
}

/// `(added, removed)` line counts between two texts.
pub(crate) fn line_delta(old: &str, new: &str) -> (u32, u32) {
    let diff = TextDiff::from_lines(old, new);
    let mut added = 0u32;
    let mut removed = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delta_counts_inserts_and_deletes() {
        assert_eq!(line_delta("a\nb\nc\n", "a\nb\nc\n"), (0, 0));
        assert_eq!(line_delta("a\nb\n", "a\nb\nc\n"), (1, 0));
        assert_eq!(line_delta("a\nb\nc\n", "a\nc\n"), (0, 1));
        assert_eq!(line_delta("a\nb\nc\n", "a\nB\nc\n"), (1, 1));
        assert_eq!(line_delta("", "x\ny\n"), (2, 0));
    }

    #[test]
    fn binary_detection_looks_for_nul() {
        assert!(is_binary(b"PNG\0\x01\x02"));
        assert!(!is_binary(b"fn main() {}\n"));
        assert!(!is_binary(b""));
    }

    #[test]
    fn missing_blobs_count_no_lines() {
        let dir = tempfile::tempdir().unwrap();
        let repo = gix::init_bare(dir.path()).unwrap();
        let missing = ObjectId::from_hex(b"1111111111111111111111111111111111111111").unwrap();

        assert!(find_blob(&repo, missing).is_none());
        assert_eq!(blob_delta(&repo, missing, missing), (0, 0));
    }

    #[test]
    fn count_lines_ignores_trailing_newline() {
        assert_eq!(count_lines(b"one\ntwo\n"), 2);
        assert_eq!(count_lines(b"one\ntwo"), 2);
        assert_eq!(count_lines(b""), 0);
    }
}
