use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case(&["add", "."])]
#[case(&["commit", "-m", "message"])]
#[case(&["log"])]
#[case(&["merge", "feature"])]
fn run_outside_repository_fails(repository_dir: TempDir, #[case] args: &[&str]) {
    run_minigit_command(repository_dir.path(), args)
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: not a minigit repository"));

    assert!(!repository_dir.path().join(".minigit").exists());
}
