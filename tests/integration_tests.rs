//! Integration tests for mdu
//!
//! Every test builds a fixture tree with tempfile, runs the compiled
//! binary against it, and checks stdout/stderr/exit status. Expected
//! counts are derived from `lstat` on the fixture itself: a readable
//! directory counts twice (its own inode plus the `.` self-entry), every
//! other entry counts once.

#![cfg(unix)]

use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn mdu(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdu"))
        .args(args)
        .output()
        .expect("failed to run mdu binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not UTF-8")
}

fn blocks_of(path: &Path) -> u64 {
    fs::symlink_metadata(path).unwrap().blocks()
}

fn write_file(path: &Path, len: usize) {
    File::create(path).unwrap().write_all(&vec![0u8; len]).unwrap();
}

#[test]
fn test_empty_directory_sequential_and_parallel() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let expected = format!("{}\t{}\n", 2 * blocks_of(dir.path()), root);

    for args in [vec![root], vec!["-j", "4", root]] {
        let output = mdu(&args);
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), expected);
        assert!(output.stderr.is_empty());
    }
}

#[test]
fn test_flat_directory_counts_all_files() {
    let dir = tempdir().unwrap();
    let mut expected = 2 * blocks_of(dir.path());
    for name in ["a", "b", "c"] {
        let file = dir.path().join(name);
        write_file(&file, 100);
        expected += blocks_of(&file);
    }
    let root = dir.path().to_str().unwrap();
    let expected = format!("{expected}\t{root}\n");

    for args in [vec![root], vec!["-j", "8", root]] {
        let output = mdu(&args);
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), expected);
    }
}

#[test]
fn test_nested_tree() {
    let dir = tempdir().unwrap();
    let sub1 = dir.path().join("sub1");
    let sub2 = sub1.join("sub2");
    fs::create_dir_all(&sub2).unwrap();
    let file = sub2.join("file");
    write_file(&file, 5000);

    let expected = 2 * blocks_of(dir.path())
        + 2 * blocks_of(&sub1)
        + 2 * blocks_of(&sub2)
        + blocks_of(&file);
    let root = dir.path().to_str().unwrap();

    let output = mdu(&["-j", "2", root]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), format!("{expected}\t{root}\n"));
}

#[test]
fn test_single_file_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("lone");
    write_file(&file, 3000);
    let root = file.to_str().unwrap();

    let output = mdu(&[root]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), format!("{}\t{root}\n", blocks_of(&file)));
}

#[test]
fn test_nonexistent_root_is_zero_and_silent() {
    let output = mdu(&["/no/such/path/anywhere"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0\t/no/such/path/anywhere\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_unreadable_subdirectory() {
    let dir = tempdir().unwrap();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Meaningless under root, which reads mode-000 directories anyway
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let expected = 2 * blocks_of(dir.path()) + blocks_of(&locked);
    let root = dir.path().to_str().unwrap();
    let output = mdu(&["-j", "2", root]);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), format!("{expected}\t{root}\n"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    let matching: Vec<&str> = stderr
        .lines()
        .filter(|line| line.contains("locked"))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(
        matching[0],
        format!(
            "mdu: cannot read directory '{}': Permission denied",
            locked.display()
        )
    );
}

#[test]
fn test_multiple_roots_in_order() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let c = tempdir().unwrap();
    write_file(&b.path().join("pad"), 9000);

    let roots = [a.path(), b.path(), c.path()];
    let args: Vec<&str> = roots.iter().map(|p| p.to_str().unwrap()).collect();

    let output = mdu(&args);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, root) in lines.iter().zip(&roots) {
        let (count, path) = line.split_once('\t').unwrap();
        assert_eq!(path, root.to_str().unwrap());
        count.parse::<u64>().unwrap();
    }
}

#[test]
fn test_schedule_independence_on_wide_tree() {
    let dir = tempdir().unwrap();
    for i in 0..10 {
        let outer = dir.path().join(format!("outer{i}"));
        fs::create_dir(&outer).unwrap();
        for j in 0..10 {
            let inner = outer.join(format!("inner{j}"));
            fs::create_dir(&inner).unwrap();
            for k in 0..10 {
                write_file(&inner.join(format!("f{k}")), 64);
            }
        }
    }
    let root = dir.path().to_str().unwrap();

    let baseline = mdu(&[root]);
    assert!(baseline.status.success());
    let baseline = stdout_of(&baseline);

    for jobs in ["2", "4", "16"] {
        let output = mdu(&["-j", jobs, root]);
        assert!(output.status.success());
        assert_eq!(stdout_of(&output), baseline, "diverged at -j {jobs}");
    }
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    write_file(&dir.path().join("sub/file"), 1234);
    let root = dir.path().to_str().unwrap();

    let first = mdu(&["-j", "4", root]);
    let second = mdu(&["-j", "4", root]);
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_no_paths_is_a_usage_error() {
    let output = mdu(&[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_unknown_flag_is_ignored() {
    let dir = tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let plain = mdu(&[root]);
    let flagged = mdu(&[root, "--definitely-not-a-flag"]);
    assert!(flagged.status.success());
    assert_eq!(plain.stdout, flagged.stdout);
}
