use crate::common::command::{init_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use sha1::{Digest, Sha1};

#[rstest]
fn cat_file(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let blob_id = format!("{:x}", Sha1::digest(b"1"));

    run_minigit_command(dir, &["cat-file", &blob_id])
        .assert()
        .success()
        .stdout("1");
}

#[rstest]
#[case("0000000000000000000000000000000000000000")]
#[case("not-an-id")]
fn cat_unknown_object_fails(init_repository_dir: TempDir, #[case] object_id: &str) {
    run_minigit_command(init_repository_dir.path(), &["cat-file", object_id])
        .assert()
        .failure()
        .stdout(predicate::str::contains(format!(
            "error: object {object_id} not found"
        )));
}
