use crate::common::command::{
    commit_file, get_head_commit_id, init_repository_dir, minigit_merge, repository_dir,
    run_minigit_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn show_history_in_medium_format(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let first = get_head_commit_id(dir);
    commit_file(dir, "a.txt", "2", "second\n\nwith a body");
    let second = get_head_commit_id(dir);

    let expected = format!(
        "commit {second}\n\
        Author: fake_user\n\
        Date:   Sun Jan 1 12:00:00 2023 +0000\n\
        \n    second\n    \n    with a body\n\
        \n\
        commit {first}\n\
        Author: fake_user\n\
        Date:   Sun Jan 1 12:00:00 2023 +0000\n\
        \n    first\n"
    );

    run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(expected);
}

#[rstest]
fn log_marks_merge_commits(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_minigit_command(dir, &["branch", "feature"])
        .assert()
        .success();
    run_minigit_command(dir, &["checkout", "feature"])
        .assert()
        .success();
    commit_file(dir, "b.txt", "b", "feature work");
    let incoming = get_head_commit_id(dir);

    run_minigit_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "c.txt", "c", "master work");
    let current = get_head_commit_id(dir);

    minigit_merge(dir, "feature").assert().success();

    run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Merge: {} {}",
            &current[..7],
            &incoming[..7]
        )))
        .stdout(predicate::str::contains("    Merge branch 'feature'"))
        // first-parent walk skips the feature commit
        .stdout(predicate::str::contains("feature work").not());
}

#[rstest]
fn log_on_empty_branch_prints_nothing(repository_dir: TempDir) {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();

    run_minigit_command(dir, &["log"])
        .assert()
        .success()
        .stdout("");
}
