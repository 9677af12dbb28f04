use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::fixture;
use std::path::Path;

/// A directory holding an empty `.git` with an object store and no index
#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dir.child(".git")
        .child("objects")
        .create_dir_all()
        .expect("Failed to create object store");
    dir
}

pub fn git_dir(repository_dir: &TempDir) -> std::path::PathBuf {
    repository_dir.path().join(".git")
}

pub fn run_bit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bit-inspect").expect("Failed to find bit-inspect binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("BIT_MAX_PATH_LEN");
    cmd.env_remove("BIT_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout is not UTF-8")
}
