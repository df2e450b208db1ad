//! # File System Operations Module / 文件系统操作模块
//!
//! Cleanup of the simulation working directory and relocation of generator
//! output directories.
//!
//! 仿真工作目录的清理以及生成器输出目录的移动。

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, move_dir};
use std::fs;
use std::path::{Path, PathBuf};

/// What a cleanup pass did.
/// 一次清理的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupReport {
    /// The directory was not the expected working directory; nothing was touched.
    Skipped { dir_name: String, expected: String },
    /// Entries were removed; `failed` lists those that could not be.
    Cleaned { removed: usize, failed: Vec<PathBuf> },
}

impl CleanupReport {
    pub fn removed(&self) -> usize {
        match self {
            CleanupReport::Skipped { .. } => 0,
            CleanupReport::Cleaned { removed, .. } => *removed,
        }
    }
}

/// Removes every direct entry of `dir` if its last path segment is `sentinel`.
///
/// Directories are removed recursively, everything else (including symlinks,
/// which are never followed) as a single file. A failure on one entry is
/// logged and recorded in the report; the remaining entries are still
/// processed. `dir` itself is left in place.
///
/// # Errors
/// Only when `dir` cannot be listed.
pub fn cleanup_sim_dir(dir: &Path, sentinel: &str) -> Result<CleanupReport> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if dir_name != sentinel {
        tracing::debug!("{} is not '{}', leaving it alone", dir.display(), sentinel);
        return Ok(CleanupReport::Skipped {
            dir_name,
            expected: sentinel.to_string(),
        });
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut removed = 0;
    let mut failed = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        match remove_entry(&path) {
            Ok(()) => removed += 1,
            Err(e) => {
                tracing::warn!("could not remove {}: {}", path.display(), e);
                failed.push(path);
            }
        }
    }

    Ok(CleanupReport::Cleaned { removed, failed })
}

fn remove_entry(path: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Moves the directory `from` to `to`, replacing a stale `to` left by an
/// earlier run. Falls back to a recursive move when a plain rename is not
/// possible (for example across file systems).
pub fn replace_dir(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        tracing::info!("removing stale {}", to.display());
        fs::remove_dir_all(to)
            .with_context(|| format!("Failed to remove stale directory: {}", to.display()))?;
    }

    if let Err(e) = fs::rename(from, to) {
        tracing::debug!("rename failed ({}), moving recursively", e);
        let mut options = CopyOptions::new();
        options.copy_inside = true;
        move_dir(from, to, &options).with_context(|| {
            format!("Failed to move {} to {}", from.display(), to.display())
        })?;
    }
    Ok(())
}

/// Gets the absolute path from a potentially relative path.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
