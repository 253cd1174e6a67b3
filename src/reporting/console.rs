//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the closing summary of a batch to the console: one line
//! per run with its outcome, duration and result file, followed by the totals.
//!
//! 此模块在控制台打印批次的最终摘要：每次运行一行，
//! 包含其结果、耗时和结果文件，最后是汇总数量。

use colored::*;

use crate::core::models::{BatchSummary, RunOutcome};
use crate::infra::t;

/// Prints a formatted summary of all runs to the console.
/// Uses color coding to tell engine successes from failures.
///
/// 在控制台打印所有运行的格式化摘要。
/// 使用颜色编码区分引擎成功和失败。
///
/// # Output Format / 输出格式
/// ```text
/// --- Benchmark Summary ---
///   - Status             | Run                                      |   Duration | Output
///   - Succeeded          | q1-void-0                                |     1.23s  | test-queries/q1-void-0.tsv
///   - Engine exit 1      | q1-base-0                                |   450.12ms | test-queries/q1-base-0.tsv
/// ```
pub fn print_summary(summary: &BatchSummary, locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());

    for record in &summary.records {
        let status_str = record.outcome.get_status_str(locale);
        let status_colored = match record.outcome {
            RunOutcome::Succeeded => status_str.green(),
            RunOutcome::EngineFailed { .. } => status_str.yellow(),
            RunOutcome::LaunchFailed { .. } => status_str.red(),
        };

        println!(
            "  - {:<20} | {:<40} | {:>10} | {}",
            status_colored,
            record.run_name(),
            format!("{:.2?}", record.duration),
            record.output_path.display()
        );
    }

    println!(
        "\n{}",
        t!(
            "report.totals",
            locale = locale,
            total = summary.records.len(),
            succeeded = summary.succeeded(),
            failed = summary.failed()
        )
    );

    if summary.ignored_entries > 0 {
        println!(
            "{}",
            t!(
                "report.ignored_entries",
                locale = locale,
                count = summary.ignored_entries
            )
            .dimmed()
        );
    }
}

/// Prints the test cases that were skipped because they could not be loaded.
///
/// 打印因无法加载而被跳过的测试用例。
pub fn print_skipped_case_details(summary: &BatchSummary, locale: &str) {
    if summary.skipped.is_empty() {
        return;
    }

    println!("\n{}", t!("report.skipped_banner", locale = locale).red().bold());
    println!("{}", "-".repeat(80));

    for (i, skipped) in summary.skipped.iter().enumerate() {
        println!(
            "[{}/{}] {}",
            i + 1,
            summary.skipped.len(),
            skipped.path.display().to_string().cyan()
        );
        println!("  {}", skipped.error);
    }
    println!("{}", "-".repeat(80));
}
