use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed commit instants so object ids are reproducible across runs.
pub const T0: &str = "2024-05-01T12:00:00+00:00";
pub const T1: &str = "2024-05-01T12:01:00+00:00";
pub const T2: &str = "2024-05-01T12:02:00+00:00";
pub const T3: &str = "2024-05-01T12:03:00+00:00";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gogit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Build a `gogit` invocation with compression switched off, so tests can
/// inspect object files directly.
pub fn run_gogit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gogit").expect("Failed to find gogit binary");
    cmd.current_dir(dir).env("GOGIT_NO_COMPRESS", "1");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// `gogit commit -m <message>` at a pinned timestamp.
pub fn gogit_commit(dir: &Path, message: &str, timestamp: &str) -> Command {
    let mut cmd = run_gogit_command(dir, &["commit", "-m", message]);
    cmd.env("GOGIT_COMMIT_TIME", timestamp);
    cmd
}

/// Write one file, stage everything, and commit at the given instant.
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str, timestamp: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_gogit_command(dir, &["add", "."]).assert().success();
    gogit_commit(dir, message, timestamp).assert().success();
}
