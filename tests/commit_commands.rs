use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    T0, T1, commit_file, gogit_commit, init_repository_dir, repository_dir, run_gogit_command,
};
use common::file::{FileSpec, write_file};
use common::{head_oid, is_hex_oid, objects_count, read_ref};

#[rstest]
fn first_commit_produces_blob_tree_and_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("test.txt"), "Hello World!".to_string()));
    run_gogit_command(dir.path(), &["add", "test.txt"])
        .assert()
        .success();

    gogit_commit(dir.path(), "first", T0)
        .assert()
        .success()
        .stdout(predicate::str::contains("commit: "));

    // exactly one blob, one tree, one commit
    assert_eq!(objects_count(dir.path()), 3);
    assert_eq!(read_ref(dir.path(), "HEAD"), "ref: refs/heads/main");
    assert!(is_hex_oid(&read_ref(dir.path(), "refs/heads/main")));
}

#[rstest]
fn identical_index_timestamp_and_message_produce_identical_commits(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let twin = TempDir::new()?;

    for dir in [repository_dir.path(), twin.path()] {
        run_gogit_command(dir, &["init"]).assert().success();
        commit_file(dir, "test.txt", "Hello World!", "first", T0);
    }

    assert_eq!(head_oid(repository_dir.path()), head_oid(twin.path()));
    Ok(())
}

#[rstest]
fn commit_without_an_index_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    gogit_commit(dir.path(), "empty", T0)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn commit_requires_a_nonempty_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    write_file(FileSpec::new(dir.path().join("a.txt"), "a".to_string()));
    run_gogit_command(dir.path(), &["add", "."]).assert().success();

    gogit_commit(dir.path(), "", T0)
        .assert()
        .failure()
        .stderr(predicate::str::contains("message"));
}

#[rstest]
fn commits_chain_through_the_current_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "one", "first", T0);
    let first = head_oid(dir.path());

    commit_file(dir.path(), "a.txt", "two", "second", T1);
    let second = head_oid(dir.path());

    assert_ne!(first, second);
    // the new tip's payload names the old tip as parent
    run_gogit_command(dir.path(), &["cat-file", &second])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("parent {first}")));
}

#[rstest]
fn log_walks_history_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "one", "first", T0);
    let first = head_oid(dir.path());
    commit_file(dir.path(), "a.txt", "two", "second", T1);
    let second = head_oid(dir.path());

    let output = run_gogit_command(dir.path(), &["log"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).expect("utf-8 log output");

    let first_at = output.find(&first).expect("first commit in log");
    let second_at = output.find(&second).expect("second commit in log");
    assert!(second_at < first_at);
    assert!(output.contains("message: \"second\""));
    // the tip is decorated with the refs pointing at it
    assert!(output.contains("refs/heads/main"));
}

#[rstest]
fn log_on_an_empty_repository_prints_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_gogit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
