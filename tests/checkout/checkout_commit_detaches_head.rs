use crate::common::command::{
    commit_field, commit_file, get_head_commit_id, init_repository_dir, read_branch_head,
    read_head, run_minigit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn checkout_commit_detaches_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir);
    commit_file(dir, "a.txt", "2", "second");
    let second = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("You are in 'detached HEAD' state"))
        .stdout(predicate::str::contains(format!(
            "HEAD is now at {} first",
            &first[..7]
        )));

    assert_eq!(read_head(dir), first);
    assert_eq!(read_file(&dir.join("a.txt")), "1");
    assert_eq!(read_branch_head(dir, "master"), second);
}

#[rstest]
fn checkout_abbreviated_id_stores_full_id(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", &first[..7]])
        .assert()
        .success();

    assert_eq!(read_head(dir), first);
}

#[rstest]
fn checkout_parent_notation(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir);
    commit_file(dir, "a.txt", "2", "second");
    commit_file(dir, "a.txt", "3", "third");

    run_minigit_command(dir, &["checkout", "master~2"])
        .assert()
        .success();
    assert_eq!(read_head(dir), first);

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "@^"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("a.txt")), "2");
}

#[rstest]
fn commit_while_detached_moves_only_head(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", &first])
        .assert()
        .success();
    commit_file(dir, "a.txt", "detached", "experiment");

    let experiment = read_head(dir);
    assert_ne!(experiment, first);
    assert_eq!(commit_field(dir, &experiment, "prevCommit"), first);
    assert_eq!(read_branch_head(dir, "master"), first);

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Previous HEAD position was {} experiment",
            &experiment[..7]
        )));
    assert_eq!(read_file(&dir.join("a.txt")), "1");
}
