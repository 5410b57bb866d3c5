use crate::common::command::{
    cat_object, commit_field, get_head_commit_id, minigit_commit, repository_dir,
    run_minigit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use sha1::{Digest, Sha1};

#[rstest]
fn commit_record_format(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("a.txt"), "1".to_string()));
    run_minigit_command(dir, &["add", "a.txt"]).assert().success();

    minigit_commit(dir, "first")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[master \(root-commit\) [0-9a-f]{7}\] first\n$",
        )?);

    let commit_id = get_head_commit_id(dir);
    let record = cat_object(dir, &commit_id);
    let snapshot_id = commit_field(dir, &commit_id, "stageSnapshot");

    pretty_assertions::assert_eq!(
        record,
        format!(
            "stageSnapshot: {snapshot_id}\nprevCommit: none\ntimestamp: 2023-01-01 12:00:00 +0000\nauthor: fake_user\ncomment: first\n"
        )
    );

    // the id is the digest of the stored record
    let digest = format!("{:x}", Sha1::digest(record.as_bytes()));
    assert_eq!(digest, commit_id);

    // the snapshot lists the committed file
    let blob_id = format!("{:x}", Sha1::digest(b"1"));
    assert_eq!(cat_object(dir, &snapshot_id), format!("a.txt {blob_id}\n"));

    Ok(())
}

#[rstest]
fn second_commit_points_at_first(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();

    write_file(FileSpec::new(dir.join("a.txt"), "1".to_string()));
    run_minigit_command(dir, &["add", "a.txt"]).assert().success();
    minigit_commit(dir, "first").assert().success();
    let first = get_head_commit_id(dir);

    write_file(FileSpec::new(dir.join("a.txt"), "2".to_string()));
    run_minigit_command(dir, &["add", "a.txt"]).assert().success();
    minigit_commit(dir, "second")
        .assert()
        .success()
        .stdout(predicate::str::contains("(root-commit)").not());
    let second = get_head_commit_id(dir);

    assert_ne!(first, second);
    assert_eq!(commit_field(dir, &second, "prevCommit"), first);
    assert_eq!(commit_field(dir, &second, "comment"), "second");
}
