//! Directory scanning and block counting
//!
//! Both traversal modes share one level-scan: count the directory's own
//! inode and its `.` self-entry, add every non-directory child, and hand
//! the sub-directories back to the caller. Sequential mode recurses into
//! them on the spot; parallel mode turns each one into a queue task.
//!
//! Block counts come from `lstat` (`symlink_metadata`) in 512-byte units,
//! exactly as the filesystem reports them. Symbolic links are never
//! followed: a link contributes its own inode blocks like any other
//! non-directory.

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Result of scanning a single directory level
#[derive(Debug, Default)]
pub struct LevelScan {
    /// Blocks counted at this level: the inode itself, the `.` self-entry,
    /// and all non-directory children
    pub blocks: u64,

    /// Sub-directories discovered at this level
    pub subdirs: Vec<PathBuf>,

    /// True when this directory could not be opened for reading
    pub denied: bool,
}

/// Result of a full sequential walk
#[derive(Debug, Default)]
pub struct TreeScan {
    /// Blocks over the whole subtree
    pub blocks: u64,

    /// True when any directory in the subtree was unreadable
    pub denied: bool,
}

/// Join a directory path and an entry name, inserting a separator iff the
/// directory path does not already end in one.
pub fn join_entry(dir: &Path, name: &OsStr) -> PathBuf {
    let mut path = PathBuf::with_capacity(dir.as_os_str().len() + name.len() + 1);
    path.push(dir);
    path.push(name);
    path
}

/// Scan one directory level.
///
/// - A path that cannot be lstat'ed contributes nothing. Top-of-task paths
///   vanish silently; anything else was already seen while enumerating the
///   parent.
/// - A non-directory contributes its own blocks.
/// - An unreadable directory gets a stderr diagnostic, flags `denied`, and
///   still contributes its own blocks.
/// - A readable directory contributes its own inode plus the `.`
///   self-entry (the same `st_blocks` value twice; `read_dir` never yields
///   `.` so the entry is credited here), then each child: non-directories
///   are counted, directories are collected for the caller. A child whose
///   lstat fails credits the parent's blocks once more and ends the
///   enumeration of this level.
pub fn scan_level(path: &Path) -> LevelScan {
    let mut scan = LevelScan::default();

    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(_) => return scan,
    };

    if !meta.file_type().is_dir() {
        scan.blocks = meta.blocks();
        return scan;
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => {
            // Single whole-line write; workers may interleave lines but
            // never partial ones
            eprintln!(
                "mdu: cannot read directory '{}': Permission denied",
                path.display()
            );
            scan.denied = true;
            scan.blocks = meta.blocks();
            return scan;
        }
    };

    // Own inode plus the `.` self-entry
    scan.blocks = 2 * meta.blocks();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => break,
        };
        let child = join_entry(path, &entry.file_name());
        let child_meta = match fs::symlink_metadata(&child) {
            Ok(meta) => meta,
            Err(_) => {
                // Vanished mid-enumeration: credit the parent once more
                // and stop reading this directory
                scan.blocks += meta.blocks();
                break;
            }
        };

        if child_meta.file_type().is_dir() {
            scan.subdirs.push(child);
        } else {
            scan.blocks += child_meta.blocks();
        }
    }

    trace!(
        path = %path.display(),
        blocks = scan.blocks,
        subdirs = scan.subdirs.len(),
        "level scanned"
    );

    scan
}

/// Walk a subtree depth-first on the calling thread (single-threaded mode)
pub fn scan_tree(path: &Path) -> TreeScan {
    let level = scan_level(path);
    let mut tree = TreeScan {
        blocks: level.blocks,
        denied: level.denied,
    };

    for subdir in level.subdirs {
        let sub = scan_tree(&subdir);
        tree.blocks += sub.blocks;
        tree.denied |= sub.denied;
    }

    tree
}
