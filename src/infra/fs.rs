//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides the file system utilities of the harness: listing the
//! cases directory, naming and writing result files, and resolving paths.
//!
//! 此模块提供本工具的文件系统功能：列出用例目录、
//! 命名并写入结果文件，以及解析路径。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the result file path `{dir}/{case_id}-{variant}-{repetition}.{extension}`.
///
/// # Arguments
/// * `dir` - Directory of the test case
/// * `case_id` - Case file name without its suffix
/// * `variant` - Variant name
/// * `repetition` - Zero-based repetition index
/// * `extension` - Result file extension, without the dot
pub fn output_path(
    dir: &Path,
    case_id: &str,
    variant: &str,
    repetition: u32,
    extension: &str,
) -> PathBuf {
    dir.join(format!("{case_id}-{variant}-{repetition}.{extension}"))
}

/// Writes a result record, replacing any previous file at `path`.
pub fn write_record(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .with_context(|| format!("Failed to write result file: {}", path.display()))
}

/// Lists the entries of `dir`.
///
/// # Returns
/// The entry paths, or an error when the directory is missing or unreadable
pub fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read cases directory: {}", dir.display()))?;
    entries
        .map(|entry| {
            entry
                .map(|e| e.path())
                .with_context(|| format!("Failed to list cases directory: {}", dir.display()))
        })
        .collect()
}

/// Checks if a path exists and is a directory.
pub fn is_directory(path: &Path) -> bool {
    path.exists() && path.is_dir()
}

/// Gets the absolute path from a potentially relative path.
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
