use crate::common::command::{init_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("feature..name")]
#[case("feature.lock")]
#[case("feature/")]
#[case("with space")]
#[case("HEAD")]
fn create_branch_with_invalid_name(init_repository_dir: TempDir, #[case] branch_name: &str) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", branch_name])
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "error: invalid branch name '{branch_name}'"
        )));
}
