use crate::common::command::{
    commit_file, init_repository_dir, read_branch_head, run_minigit_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    let feature_head = read_branch_head(dir, "feature");

    commit_file(dir, "a.txt", "2", "second");

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("branch 'feature' already exists"));
    run_minigit_command(dir, &["branch", "master"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("branch 'master' already exists"));

    // the existing branch is left untouched
    assert_eq!(read_branch_head(dir, "feature"), feature_head);
}
