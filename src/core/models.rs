//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures produced by a benchmark run:
//! one `RunRecord` per engine invocation and the `BatchSummary` of a whole walk.
//!
//! 此模块定义基准运行产生的数据结构：
//! 每次引擎调用对应一个 `RunRecord`，整个遍历对应一个 `BatchSummary`。

use crate::infra::t;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// How a single engine invocation ended.
/// 单次引擎调用的结束方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The engine exited with code 0; its stdout was recorded.
    /// 引擎以退出码 0 结束；记录了其标准输出。
    Succeeded,
    /// The engine exited with a non-zero code, or was terminated by a signal
    /// (`code` is `None` then); its stderr was recorded.
    /// 引擎以非零退出码结束或被信号终止；记录了其标准错误。
    EngineFailed { code: Option<i32> },
    /// The engine could not be spawned or awaited; the error chain was recorded.
    /// 无法启动或等待引擎；记录了错误链。
    LaunchFailed { message: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }

    /// Gets the outcome as a localized string for display.
    /// 以本地化字符串形式获取结果以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            RunOutcome::Succeeded => t!("report.status_succeeded", locale = locale).to_string(),
            RunOutcome::EngineFailed { code: Some(code) } => {
                t!("report.status_engine_failed", locale = locale, code = code).to_string()
            }
            RunOutcome::EngineFailed { code: None } => {
                t!("report.status_engine_killed", locale = locale).to_string()
            }
            RunOutcome::LaunchFailed { .. } => {
                t!("report.status_launch_failed", locale = locale).to_string()
            }
        }
    }
}

/// The result of one (case, variant, repetition) run. The raw captured text
/// lives in the file at `output_path`; the record only describes it.
///
/// 一次（用例、变体、重复）运行的结果。原始捕获文本保存在 `output_path`
/// 指向的文件中；记录本身只描述它。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub case_id: String,
    pub variant: String,
    pub repetition: u32,
    pub outcome: RunOutcome,
    pub output_path: PathBuf,
    /// Wall time of the engine invocation, excluding the pause after it.
    pub duration: Duration,
}

impl RunRecord {
    /// `{case}-{variant}-{repetition}`, the stem of the output file.
    pub fn run_name(&self) -> String {
        format!("{}-{}-{}", self.case_id, self.variant, self.repetition)
    }
}

impl fmt::Display for RunRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.run_name(), self.output_path.display())
    }
}

/// A test case that could not be loaded and was skipped (only with `keep_going`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCase {
    pub path: PathBuf,
    pub error: String,
}

/// Everything a batch produced, in execution order.
/// 一个批次产生的全部结果，按执行顺序排列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: Vec<RunRecord>,
    pub skipped: Vec<SkippedCase>,
    /// Directory entries that did not carry the case suffix.
    pub ignored_entries: usize,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    pub fn has_skipped_cases(&self) -> bool {
        !self.skipped.is_empty()
    }
}
