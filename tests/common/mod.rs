#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap()
            .success(),
        "git {args:?} failed"
    );
}

pub fn init_git_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
}

pub fn checkout_new_branch(dir: &Path, name: &str) {
    git(dir, &["checkout", "-q", "-b", name]);
}

pub fn checkout_previous(dir: &Path) {
    git(dir, &["checkout", "-q", "-"]);
}

pub fn merge_no_ff(dir: &Path, branch: &str, date: &str) {
    let status = Command::new("git")
        .args(["merge", "-q", "--no-ff", branch, "-m", &format!("merge {branch}")])
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success());
}

/// Writes `content` to `name` and commits it at `date` (`YYYY-MM-DD`, noon UTC).
pub fn commit_file_on(dir: &Path, name: &str, content: &str, date: &str, author: Option<&str>) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);

    let stamp = format!("{date} 12:00:00 +0000");
    let mut cmd = Command::new("git");
    cmd.args(["commit", "-q", "-m", &format!("update {name}")]);
    if let Some(author) = author {
        cmd.arg(format!("--author={author}"));
    }
    let status = cmd
        .env("GIT_AUTHOR_DATE", &stamp)
        .env("GIT_COMMITTER_DATE", &stamp)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success());
}

/// `git clone --depth <depth>` of `src` into `dest` over the file protocol,
/// so the clone is genuinely shallow.
pub fn shallow_clone(src: &Path, dest: &Path, depth: u32) {
    let url = format!("file://{}", src.display());
    let status = Command::new("git")
        .args(["clone", "-q", "--depth", &depth.to_string(), &url])
        .arg(dest)
        .status()
        .unwrap();
    assert!(status.success());
}
