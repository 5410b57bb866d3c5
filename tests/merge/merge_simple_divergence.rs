use crate::common::command::{
    commit_field, commit_file, get_head_commit_id, init_repository_dir, minigit_merge,
    read_branch_head, run_minigit_command,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn merge_simple_divergence(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let base = get_head_commit_id(dir);

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "2", "change a");
    commit_file(dir, "feature.txt", "only on feature", "add feature file");
    let incoming = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "b.txt", "master side", "add b");
    let current = get_head_commit_id(dir);

    minigit_merge(dir, "feature")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Merging {} into {} (base {})",
            &incoming[..7],
            &current[..7],
            &base[..7]
        )))
        .stdout(predicate::str::contains("Merge made by the three-way policy."))
        .stdout(predicate::str::contains("CONFLICT").not());

    let merge_commit = read_branch_head(dir, "master");
    assert_eq!(
        commit_field(dir, &merge_commit, "prevCommit"),
        format!("{current},{incoming}")
    );
    assert_eq!(
        commit_field(dir, &merge_commit, "comment"),
        "Merge branch 'feature'"
    );

    assert_eq!(read_file(&dir.join("a.txt")), "2");
    assert_eq!(read_file(&dir.join("b.txt")), "master side");
    assert_eq!(read_file(&dir.join("feature.txt")), "only on feature");

    // the incoming branch is left where it was
    assert_eq!(read_branch_head(dir, "feature"), incoming);
}

#[rstest]
fn merge_fast_forward_shape_still_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let current = get_head_commit_id(dir);

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "a.txt", "2", "change a");
    let incoming = get_head_commit_id(dir);
    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();

    minigit_merge(dir, "feature").assert().success();

    let merge_commit = read_branch_head(dir, "master");
    assert_ne!(merge_commit, incoming);
    assert_eq!(
        commit_field(dir, &merge_commit, "prevCommit"),
        format!("{current},{incoming}")
    );
    assert_eq!(read_file(&dir.join("a.txt")), "2");
}
