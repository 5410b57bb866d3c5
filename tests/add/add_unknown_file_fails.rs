use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn add_unknown_file_fails(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("real.txt"), "real".to_string()));

    run_minigit_command(dir, &["add", "real.txt", "ghost.txt"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "error: pathspec 'ghost.txt' did not match any files",
        ));

    // nothing was staged, not even the existing file
    assert!(
        !dir.join(".minigit")
            .join("staging")
            .join("heads")
            .join("master")
            .exists()
    );
}

#[rstest]
#[case(".minigit/HEAD")]
#[case(".minigit/refs")]
fn add_metadata_file_fails(repository_dir: TempDir, #[case] target: &str) {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();

    run_minigit_command(dir, &["add", target])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "it belongs to the repository metadata",
        ));

    assert!(
        !dir.join(".minigit")
            .join("staging")
            .join("heads")
            .join("master")
            .exists()
    );
}
