use crate::common::command::{
    commit_field, commit_file, get_head_commit_id, init_repository_dir, minigit_merge,
    read_branch_head, run_minigit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merge_with_conflicts(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "feature", "feature edits a");
    commit_file(dir, "c.txt", "clean", "feature adds c");
    let incoming = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "master", "master edits a");
    let current = get_head_commit_id(dir);

    minigit_merge(dir, "feature")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "CONFLICT (content): Merge conflict in a.txt",
        ))
        .stdout(predicate::str::contains(
            "Merge committed with 1 conflicted file(s)",
        ));

    // the conflicted file keeps its working copy, clean paths are merged
    assert_eq!(read_file(&dir.join("a.txt")), "master");
    assert_eq!(read_file(&dir.join("c.txt")), "clean");

    let merge_commit = read_branch_head(dir, "master");
    assert_ne!(merge_commit, current);
    assert_eq!(
        commit_field(dir, &merge_commit, "prevCommit"),
        format!("{current},{incoming}")
    );
}

#[rstest]
fn identical_changes_do_not_conflict(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "same", "feature edits a");

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "same", "master edits a");

    minigit_merge(dir, "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFLICT").not());
    assert_eq!(read_file(&dir.join("a.txt")), "same");
}
