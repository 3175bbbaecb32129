use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{T0, T1, T2, commit_file, init_repository_dir, run_gogit_command};
use common::{head_oid, objects_count, read_ref};

fn remote_arg(dir: &TempDir) -> String {
    dir.path().to_string_lossy().to_string()
}

#[rstest]
fn push_copies_the_closure_and_advances_the_remote_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = init_repository_dir;
    let remote = TempDir::new()?;
    run_gogit_command(remote.path(), &["init"]).assert().success();

    commit_file(local.path(), "a.txt", "one", "first", T0);
    let tip = head_oid(local.path());

    run_gogit_command(local.path(), &["push", &remote_arg(&remote), "main"])
        .assert()
        .success();

    assert_eq!(objects_count(remote.path()), 3);
    assert_eq!(read_ref(remote.path(), "refs/heads/main"), tip);
    Ok(())
}

#[rstest]
fn push_accepts_a_fast_forward_of_known_history(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = init_repository_dir;
    let remote = TempDir::new()?;
    run_gogit_command(remote.path(), &["init"]).assert().success();

    commit_file(local.path(), "a.txt", "one", "first", T0);
    run_gogit_command(local.path(), &["push", &remote_arg(&remote), "main"])
        .assert()
        .success();

    commit_file(local.path(), "a.txt", "two", "second", T1);
    let tip = head_oid(local.path());

    run_gogit_command(local.path(), &["push", &remote_arg(&remote), "main"])
        .assert()
        .success();

    assert_eq!(read_ref(remote.path(), "refs/heads/main"), tip);
    assert_eq!(objects_count(remote.path()), 6);
    Ok(())
}

#[rstest]
fn push_refuses_to_overwrite_unseen_remote_history(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = init_repository_dir;
    let remote = TempDir::new()?;
    run_gogit_command(remote.path(), &["init"]).assert().success();

    commit_file(local.path(), "a.txt", "one", "first", T0);
    run_gogit_command(local.path(), &["push", &remote_arg(&remote), "main"])
        .assert()
        .success();

    // the remote advances on its own...
    commit_file(remote.path(), "b.txt", "remote work", "remote second", T1);
    let remote_tip = head_oid(remote.path());
    let remote_objects = objects_count(remote.path());

    // ...while the local branch diverges
    commit_file(local.path(), "c.txt", "local work", "local second", T2);

    run_gogit_command(local.path(), &["push", &remote_arg(&remote), "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "remote branch is not an ancestor of local",
        ));

    // refusal makes no writes
    assert_eq!(read_ref(remote.path(), "refs/heads/main"), remote_tip);
    assert_eq!(objects_count(remote.path()), remote_objects);
    Ok(())
}

#[rstest]
fn fetch_copies_remote_heads_into_the_remote_namespace(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = init_repository_dir;
    let remote = TempDir::new()?;
    run_gogit_command(remote.path(), &["init"]).assert().success();

    commit_file(remote.path(), "a.txt", "one", "first", T0);
    let remote_tip = head_oid(remote.path());

    run_gogit_command(local.path(), &["fetch", &remote_arg(&remote)])
        .assert()
        .success();

    assert_eq!(read_ref(local.path(), "refs/remote/main"), remote_tip);
    // the closure came along, so the fetched tip resolves locally
    assert_eq!(objects_count(local.path()), 3);
    run_gogit_command(local.path(), &["log", &remote_tip])
        .assert()
        .success()
        .stdout(predicate::str::contains(&remote_tip));
    Ok(())
}

#[rstest]
fn fetch_skips_objects_that_are_already_present(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let local = init_repository_dir;
    let remote = TempDir::new()?;
    run_gogit_command(remote.path(), &["init"]).assert().success();

    commit_file(remote.path(), "a.txt", "one", "first", T0);
    run_gogit_command(local.path(), &["fetch", &remote_arg(&remote)])
        .assert()
        .success();
    assert_eq!(objects_count(local.path()), 3);

    run_gogit_command(local.path(), &["fetch", &remote_arg(&remote)])
        .assert()
        .success();
    assert_eq!(objects_count(local.path()), 3);
    Ok(())
}

#[rstest]
fn remote_paths_must_hold_a_repository(init_repository_dir: TempDir) {
    let local = init_repository_dir;

    run_gogit_command(local.path(), &["fetch", "/nonexistent/elsewhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
