use crate::common::command::{init_repository_dir, read_head, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("nope")]
#[case("deadbeef")]
#[case("0000000000000000000000000000000000000000")]
#[case("master~5")]
fn checkout_unknown_reference_fails(init_repository_dir: TempDir, #[case] target: &str) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["checkout", target])
        .assert()
        .failure()
        .stdout(predicate::str::contains("did not match any branch or commit"));

    assert_eq!(read_head(dir), "master");
}
