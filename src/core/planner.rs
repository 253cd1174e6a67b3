//! # Case Planner Module / 用例计划模块
//!
//! This module walks the cases directory and decides which entries are test
//! cases. Selection is by file name suffix only; the documents are not opened
//! here.
//!
//! 此模块遍历用例目录并决定哪些条目是测试用例。
//! 仅按文件名后缀选择；此处不会打开文档。

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::infra::fs;

/// The ordered list of case files to execute.
/// 要执行的用例文件的有序列表。
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CasePlan {
    /// Case files, sorted by file name so runs are reproducible.
    /// 按文件名排序的用例文件，使运行结果可复现。
    pub cases: Vec<PathBuf>,
    /// Entries that were skipped because they are not case files.
    /// 因不是用例文件而被跳过的条目数量。
    pub ignored_entries: usize,
}

/// Lists `dir` and keeps the regular files whose name ends with `suffix`.
///
/// # Errors
/// Fails when `dir` does not exist, is not a directory, or cannot be read.
///
/// 列出 `dir` 并保留文件名以 `suffix` 结尾的普通文件。
pub fn plan_cases(dir: &Path, suffix: &str) -> Result<CasePlan> {
    if !fs::is_directory(dir) {
        bail!("Cases directory does not exist: {}", dir.display());
    }

    let (mut cases, ignored): (Vec<_>, Vec<_>) = fs::list_dir(dir)?
        .into_iter()
        .partition(|path| is_case_file(path, suffix));

    cases.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(CasePlan {
        cases,
        ignored_entries: ignored.len(),
    })
}

fn is_case_file(path: &Path, suffix: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix))
}
