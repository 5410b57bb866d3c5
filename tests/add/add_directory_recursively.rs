use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn add_directory_recursively(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_minigit_command(dir, &["init"]).assert().success();

    let generated = write_generated_files(&dir.join("docs"), 3);
    write_file(FileSpec::new(
        dir.join("docs").join("nested").join("deep.txt"),
        "deep".to_string(),
    ));

    let mut assert = run_minigit_command(dir, &["add", "."]).assert().success();
    for file in &generated {
        let relative = file.path.strip_prefix(dir)?.display().to_string();
        assert = assert.stdout(predicate::str::contains(format!("new file: {relative}")));
    }
    assert.stdout(predicate::str::contains(".minigit").not());

    let staged = std::fs::read_to_string(
        dir.join(".minigit")
            .join("staging")
            .join("heads")
            .join("master"),
    )?;
    assert_eq!(staged.lines().count(), 4);
    assert!(staged.contains("docs/nested/deep.txt "));

    Ok(())
}
