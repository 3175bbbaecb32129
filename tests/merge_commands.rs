use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{
    T0, T1, T2, T3, commit_file, gogit_commit, init_repository_dir, run_gogit_command,
};
use common::file::{FileSpec, write_file};
use common::{head_oid, read_ref};

/// History:
///
/// ```text
///   C1 (feature)
///    \
///     C2 (main)
/// ```
///
/// Merging main while on feature fast-forwards: no merge commit, no
/// MERGE_HEAD, the branch ref simply advances.
#[rstest]
fn merge_fast_forwards_when_head_is_an_ancestor(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "a.txt", "one", "c1", T0);
    run_gogit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir.path(), "a.txt", "two", "c2", T1);
    let c2 = head_oid(dir.path());

    run_gogit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_gogit_command(dir.path(), &["merge", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fast-forward merge"));

    assert!(!dir.path().join(".gogit/MERGE_HEAD").exists());
    assert_eq!(read_ref(dir.path(), "refs/heads/feature"), c2);
    assert_eq!(read_ref(dir.path(), "HEAD"), "ref: refs/heads/feature");
    // the working tree advanced with the tip
    let content = std::fs::read_to_string(dir.path().join("a.txt")).expect("reads a.txt");
    assert_eq!(content, "two");
}

/// History:
///
/// ```text
///       A (base)
///      / \
///     B   C
///  (main) (feature)
/// ```
///
/// A three-way merge leaves MERGE_HEAD behind; the following commit closes
/// the merge with two parents and removes it.
#[rstest]
fn three_way_merge_sets_merge_head_and_commit_closes_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    write_file(FileSpec::new(dir.path().join("left.txt"), "initial\n".to_string()));
    write_file(FileSpec::new(dir.path().join("right.txt"), "initial\n".to_string()));
    run_gogit_command(dir.path(), &["add", "."]).assert().success();
    gogit_commit(dir.path(), "a", T0).assert().success();

    run_gogit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    // B on main touches the left file
    commit_file(dir.path(), "left.txt", "initial\nmain change\n", "b", T1);
    let b = head_oid(dir.path());

    // C on feature touches the right file
    run_gogit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "right.txt", "initial\nfeature change\n", "c", T2);
    let c = head_oid(dir.path());

    run_gogit_command(dir.path(), &["merge", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please commit"));

    assert_eq!(read_ref(dir.path(), "MERGE_HEAD"), b);
    // both sides' changes landed in the working tree
    assert_eq!(
        std::fs::read_to_string(dir.path().join("left.txt")).expect("reads"),
        "initial\nmain change\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("right.txt")).expect("reads"),
        "initial\nfeature change\n"
    );

    gogit_commit(dir.path(), "merge", T3).assert().success();

    assert!(!dir.path().join(".gogit/MERGE_HEAD").exists());
    let merge_oid = head_oid(dir.path());
    let payload = run_gogit_command(dir.path(), &["cat-file", &merge_oid])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let payload = String::from_utf8(payload).expect("utf-8 payload");

    // exactly two parents, HEAD first and MERGE_HEAD second
    assert_eq!(payload.matches("parent ").count(), 2);
    let head_parent = payload.find(&format!("parent {c}")).expect("head parent");
    let merge_parent = payload.find(&format!("parent {b}")).expect("merge parent");
    assert!(head_parent < merge_parent);
}

/// Overlapping edits surface diff3 conflict markers in the working tree
/// and the merge stays uncommitted for inspection.
#[rstest]
fn conflicting_merge_leaves_markers_in_the_working_tree(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    commit_file(dir.path(), "file.txt", "line\n", "base", T0);
    run_gogit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();

    commit_file(dir.path(), "file.txt", "main side\n", "on main", T1);
    run_gogit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir.path(), "file.txt", "feature side\n", "on feature", T2);

    run_gogit_command(dir.path(), &["merge", "main"])
        .assert()
        .success();

    let merged = std::fs::read_to_string(dir.path().join("file.txt")).expect("reads");
    assert!(merged.contains("<<<<<<<"));
    assert!(merged.contains(">>>>>>>"));
    assert!(dir.path().join(".gogit/MERGE_HEAD").exists());
}
