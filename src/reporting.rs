//! # Reporting Module / 报告模块
//!
//! This module handles the display of benchmark progress and results.
//! It prints colorful, formatted run lines and a closing summary to the console
//! with internationalization support.
//!
//! 此模块处理基准测试进度和结果的显示。
//! 它在控制台打印彩色格式化的运行信息和最终摘要，支持国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_skipped_case_details, print_summary};
