//! Command-line interface tests for quill-queue

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn list_on_fresh_database_reports_empty_queue() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("quill-queue")
        .unwrap()
        .env("QUILLCAST_DB_PATH", dir.path().join("queue.db"))
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("queue is empty"));
}

#[test]
fn list_rejects_unknown_status() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("quill-queue")
        .unwrap()
        .env("QUILLCAST_DB_PATH", dir.path().join("queue.db"))
        .args(["list", "--status", "archived"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn show_unknown_id_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("quill-queue")
        .unwrap()
        .env("QUILLCAST_DB_PATH", dir.path().join("queue.db"))
        .args(["show", "no-such-post"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Post not found"));
}

#[test]
fn delete_unknown_id_succeeds_quietly() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("quill-queue")
        .unwrap()
        .env("QUILLCAST_DB_PATH", dir.path().join("queue.db"))
        .args(["delete", "no-such-post"])
        .assert()
        .success();
}
