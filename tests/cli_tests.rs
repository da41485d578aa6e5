use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::rtr;

/// Runs rtrack against an isolated data root and home directory.
fn run(home: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let root = home.join("data");
    rtr()
        .env("HOME", home)
        .env_remove("RTRACK_LOG")
        .args(["--root", root.to_str().unwrap(), "--test"])
        .args(args)
        .assert()
}

fn init_with_projects(home: &Path) {
    run(home, &["init"])
        .success()
        .stdout(contains("Workspace 'default' initialized"));
    run(home, &["project", "add", "client"]).success();
    run(home, &["project", "add", "web", "--parent", "client"]).success();
    run(home, &["project", "add", "api", "--parent", "client"]).success();
}

#[test]
fn init_creates_workspace_directories() {
    let tmp = tempfile::tempdir().unwrap();
    run(tmp.path(), &["init"]).success();

    let ws = tmp.path().join("data").join("default");
    assert!(ws.join("records").is_dir());
    assert!(ws.join("projects").is_dir());
    assert!(!tmp.path().join(".rtrack").join("rtrack.conf").exists());
}

#[test]
fn project_tree_is_listed_with_indentation() {
    let tmp = tempfile::tempdir().unwrap();
    init_with_projects(tmp.path());

    run(tmp.path(), &["project", "list"])
        .success()
        .stdout(contains("client\n  api\n  web\n"));

    run(tmp.path(), &["project", "add", "web"])
        .failure()
        .stderr(contains("Project already exists: web"));
    run(tmp.path(), &["project", "add", "x", "--parent", "ghost"])
        .failure()
        .stderr(contains("Project not found: ghost"));
}

#[test]
fn full_session_then_list_and_report() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path();
    init_with_projects(home);

    run(home, &["start", "web", "landing", "+design", "--at", "2025-06-02 09:00"])
        .success()
        .stdout(contains("Started 'web' at 2025-06-02 09:00"));
    run(home, &["status"])
        .success()
        .stdout(contains("since 2025-06-02 09:00"));

    run(home, &["pause", "lunch", "--at", "2025-06-02 10:00"]).success();
    run(home, &["resume", "--at", "2025-06-02 10:30"])
        .success()
        .stdout(contains("after 00h 30m"));
    run(home, &["stop", "--at", "2025-06-02 12:00"])
        .success()
        .stdout(contains("(02h 30m worked)"));

    run(home, &["start", "api", "--at", "2025-06-03 09:00"]).success();
    run(home, &["stop", "--at", "2025-06-03 10:00"]).success();
    run(home, &["status"])
        .success()
        .stdout(contains("No running record"));

    run(home, &["list"])
        .success()
        .stdout(contains("landing +design").and(contains("2 record(s)")));
    run(home, &["list", "-t", "design"])
        .success()
        .stdout(contains("1 record(s)"));
    run(home, &["list", "-p", "2025-06-03"])
        .success()
        .stdout(contains("api").and(contains("web").not()));

    run(home, &["report"])
        .success()
        .stdout(contains("03h 30m").and(contains("  web")));
    run(home, &["report", "api", "-p", "2025-06"])
        .success()
        .stdout(contains("01h 00m").and(contains("client").not()));
}

#[test]
fn start_requires_known_project_and_no_running_record() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path();
    init_with_projects(home);

    run(home, &["start", "ghost"])
        .failure()
        .stderr(contains("Project not found: ghost"));

    run(home, &["start", "web", "--at", "2025-06-02 09:00"]).success();
    run(home, &["start", "api", "--at", "2025-06-02 09:30"])
        .failure()
        .stderr(contains("still running"));
}

#[test]
fn stop_without_running_record_fails() {
    let tmp = tempfile::tempdir().unwrap();
    run(tmp.path(), &["init"]).success();
    run(tmp.path(), &["stop"])
        .failure()
        .stderr(contains("No running record"));
}

#[test]
fn delete_record_and_read_log() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path();
    init_with_projects(home);

    run(home, &["start", "web", "--at", "2025-06-02 09:00"]).success();
    run(home, &["stop", "--at", "2025-06-02 10:00"]).success();

    run(home, &["del", "2025-06-02", "09:00:00"])
        .success()
        .stdout(contains("Deleted record of 'web'"));
    run(home, &["del", "2025-06-02", "09:00:00"])
        .failure()
        .stderr(contains("No record found"));

    assert!(!home.join("data/default/records/2025").exists());

    run(home, &["log", "--print"])
        .success()
        .stdout(contains("start").and(contains("del")).and(contains("project")));
}

#[test]
fn workspaces_are_isolated() {
    let tmp = tempfile::tempdir().unwrap();
    let home = tmp.path();
    init_with_projects(home);
    run(home, &["-w", "side", "init"]).success();

    run(home, &["-w", "side", "project", "list"])
        .success()
        .stdout(contains("No projects"));
}
