use crate::common::command::{get_head_commit_id, init_repository_dir, minigit_commit};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn commit_without_staged_files_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let head_before = get_head_commit_id(dir);

    minigit_commit(dir, "empty")
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: nothing staged to commit"));

    assert_eq!(get_head_commit_id(dir), head_before);
}
