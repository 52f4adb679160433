mod common;

use assert_cmd::prelude::*;
use common::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// The binary with an isolated home, UTC local time and no colour.
fn gitfetch(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitfetch").unwrap();
    cmd.env("HOME", home)
        .env("TZ", "UTC")
        .env("NO_COLOR", "1")
        .env_remove("GITFETCH_CONFIG")
        .env_remove("GITFETCH_LOG");
    cmd
}

fn json_report(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

fn commit_counts(v: &serde_json::Value) -> Vec<u64> {
    v["days"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["commit_count"].as_u64().unwrap())
        .collect()
}

#[test]
fn version_mentions_gitfetch() {
    let home = tempdir().unwrap();
    gitfetch(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitfetch"));
}

#[test]
fn json_report_matches_history() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "src/a.rs", "fn a(){}\n", "2024-01-01", None);
    commit_file_on(dir.path(), "src/b.rs", "fn b(){}\nfn c(){}\n", "2024-01-02", None);
    commit_file_on(dir.path(), "src/a.rs", "fn a(){ 1 }\n", "2024-01-04", None);

    let v = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).args([
        "--since",
        "2024-01-01",
        "--until",
        "2024-01-31",
        "--json",
    ]));

    let counts = commit_counts(&v);
    assert_eq!(counts.len(), 31);
    assert_eq!(counts.iter().sum::<u64>(), 3);
    assert_eq!(&counts[..4], &[1, 1, 0, 1]);
    assert_eq!(v["summary"]["total_commits"], 3);
    assert_eq!(v["summary"]["longest_streak"], 2);
    assert_eq!(v["summary"]["lines_added"], 4);
    assert_eq!(v["summary"]["lines_removed"], 1);
    assert_eq!(v["window"]["start"], "2024-01-01");
    assert_eq!(v["since"], "2024-01-01");
}

#[test]
fn calendar_output_lists_totals() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "a.txt", "a\n", "2023-03-01", None);
    commit_file_on(dir.path(), "a.txt", "a\nb\n", "2023-03-02", None);

    gitfetch(dir.path())
        .arg("--path")
        .arg(dir.path())
        .args(["--year", "2023", "--author", "your name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("your name@2023"))
        .stdout(predicate::str::contains("Total contributions: 2"))
        .stdout(predicate::str::contains("Longest Streak: 2 days"))
        .stdout(predicate::str::contains("Mar"))
        .stdout(predicate::str::contains("Less ░░ ▒▒ ▓▓ ██ More"));
}

#[test]
fn author_filter_narrows_commits() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "a.txt", "a\n", "2024-02-01", Some("Ada <ada@example.com>"));
    commit_file_on(dir.path(), "b.txt", "b\n", "2024-02-02", Some("Grace <grace@example.com>"));
    commit_file_on(dir.path(), "c.txt", "c\n", "2024-02-03", Some("Ada <ada@example.com>"));

    let v = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).args([
        "--year", "2024", "--author", "ADA", "--json",
    ]));
    assert_eq!(v["summary"]["total_commits"], 2);
    assert_eq!(v["author"], "ADA");

    let v = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).args([
        "--year", "2024", "--author", "grace@", "--json",
    ]));
    assert_eq!(v["summary"]["total_commits"], 1);
}

#[test]
fn empty_repository_is_a_zero_report() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    let v = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).arg("--json"));
    assert_eq!(v["summary"]["total_commits"], 0);
    assert_eq!(v["summary"]["current_streak"], 0);
    assert_eq!(v["summary"]["longest_streak"], 0);
    assert!(commit_counts(&v).iter().all(|&c| c == 0));

    gitfetch(dir.path())
        .arg("--path")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits found"));
}

#[test]
fn missing_repository_fails() {
    let dir = tempdir().unwrap();
    let not_a_repo = dir.path().join("plain");
    std::fs::create_dir(&not_a_repo).unwrap();

    gitfetch(dir.path())
        .arg("--path")
        .arg(&not_a_repo)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a git repository"));
}

#[test]
fn malformed_date_is_a_usage_error() {
    let dir = tempdir().unwrap();
    gitfetch(dir.path())
        .args(["--since", "someday soon"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn ndjson_emits_one_line_per_day() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "a.txt", "a\n", "2024-05-02", None);

    let out = gitfetch(dir.path())
        .arg("--path")
        .arg(dir.path())
        .args(["--since", "2024-05-01", "--until", "2024-05-07", "--ndjson"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let days: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(days.len(), 7);
    assert_eq!(days[1]["date"], "2024-05-02");
    assert_eq!(days[1]["commit_count"], 1);
}

#[test]
fn include_merges_flag_affects_counts() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());

    commit_file_on(dir.path(), "file.txt", "a\n", "2024-04-01", None);

    checkout_new_branch(dir.path(), "feat");
    commit_file_on(dir.path(), "feat.txt", "f1\n", "2024-04-02", None);

    checkout_previous(dir.path());
    commit_file_on(dir.path(), "file.txt", "a\nc\n", "2024-04-03", None);
    merge_no_ff(dir.path(), "feat", "2024-04-04 12:00:00 +0000");

    let without = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).args([
        "--year", "2024", "--json",
    ]));
    let with = json_report(gitfetch(dir.path()).arg("--path").arg(dir.path()).args([
        "--year",
        "2024",
        "--include-merges",
        "--json",
    ]));

    assert_eq!(without["summary"]["total_commits"], 3);
    assert_eq!(with["summary"]["total_commits"], 4);
}

#[test]
fn config_file_supplies_defaults() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "a.txt", "a\n", "2024-02-01", Some("Ada <ada@example.com>"));
    commit_file_on(dir.path(), "b.txt", "b\n", "2024-02-02", Some("Grace <grace@example.com>"));

    let config = dir.path().join("gitfetch.toml");
    std::fs::write(&config, "author = \"grace\"\n").unwrap();

    let v = json_report(
        gitfetch(dir.path())
            .arg("--path")
            .arg(dir.path())
            .arg("--config")
            .arg(&config)
            .args(["--year", "2024", "--json"]),
    );
    assert_eq!(v["summary"]["total_commits"], 1);
    assert_eq!(v["author"], "grace");
}

#[test]
fn shallow_clone_is_reported() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let origin = dir.path().join("origin");
    std::fs::create_dir(&origin).unwrap();
    init_git_repo(&origin);
    commit_file_on(&origin, "src/a.rs", "fn a(){}\n", "2024-01-01", None);
    commit_file_on(&origin, "src/b.rs", "fn b(){}\nfn c(){}\n", "2024-01-02", None);
    commit_file_on(&origin, "src/a.rs", "fn a(){ 1 }\n", "2024-01-04", None);

    let shallow = dir.path().join("shallow");
    shallow_clone(&origin, &shallow, 1);

    let v = json_report(gitfetch(dir.path()).arg("--path").arg(&shallow).args([
        "--year", "2024", "--json",
    ]));

    // only the tip survives, and it is diffed against the empty tree
    assert_eq!(v["summary"]["total_commits"], 1);
    assert_eq!(v["summary"]["lines_added"], 3);
    assert_eq!(v["summary"]["lines_removed"], 0);
    assert_eq!(commit_counts(&v)[3], 1);
}

#[test]
fn config_written_by_add_token_still_loads() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    init_git_repo(dir.path());
    commit_file_on(dir.path(), "a.txt", "a\n", "2024-02-01", None);

    let home = tempdir().unwrap();
    let config_dir = home.path().join(".config").join("gitfetch");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "github_token = \"ghp_x\"\n\n[graph_colors]\nlevel1 = \"13,68,41\"\nlevel2 = \"1,108,49\"\nlevel3 = \"38,166,65\"\nlevel4 = \"57,211,83\"\n\n[text_colors]\ninfo_color = \"0,255,255\"\n\n[graph_data]\npercentiles = [0,30,60,90]\n",
    )
    .unwrap();

    gitfetch(home.path())
        .arg("--path")
        .arg(dir.path())
        .args(["--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contributions: 1"))
        .stderr(predicate::str::contains("github_token"));
}
