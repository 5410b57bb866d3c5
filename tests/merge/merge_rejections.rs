use crate::common::command::{init_repository_dir, minigit_merge, read_branch_head, read_head};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("master", "cannot merge branch 'master' into itself")]
#[case("nope", "branch 'nope' not found")]
#[case("bad..name", "branch 'bad..name' not found")]
fn merge_rejections(init_repository_dir: TempDir, #[case] branch: &str, #[case] message: &str) {
    let dir = init_repository_dir.path();
    let before = read_branch_head(dir, "master");

    minigit_merge(dir, branch)
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!("error: {message}")));

    assert_eq!(read_head(dir), "master");
    assert_eq!(read_branch_head(dir, "master"), before);
}
