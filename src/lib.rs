//! # SPARQL Bench Runner Library / SPARQL Bench Runner 库
//!
//! This library provides the core functionality for the SPARQL Bench Runner tool,
//! a configuration-driven harness that executes the SPARQL example queries embedded
//! in Turtle test cases against an external query engine, once per engine
//! configuration variant.
//!
//! 此库为 SPARQL Bench Runner 工具提供核心功能，
//! 这是一个配置驱动的测试工具，针对每个引擎配置变体，
//! 用外部查询引擎执行嵌入在 Turtle 测试用例中的 SPARQL 示例查询。
//!
//! ## Modules / 模块
//!
//! - `core` - Test case loading, configuration, planning and execution
//! - `infra` - Infrastructure services like command execution and file system operations
//! - `reporting` - Console progress and summary output
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 测试用例加载、配置、计划和执行
//! - `infra` - 基础设施服务，如命令执行和文件系统操作
//! - `reporting` - 控制台进度和摘要输出
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use core::case;
pub use core::config;
pub use core::execution;
pub use core::models;

/// Resolves the language used for console messages.
///
/// An explicit request (from `--lang` or the config file) wins when it names an
/// available locale. Otherwise the system locale is tried, first in full
/// (e.g., "zh-CN") and then by its language part (e.g., "en" from "en-US"),
/// finally falling back to "en".
pub fn resolve_locale(requested: Option<&str>) -> String {
    let available_locales = rust_i18n::available_locales!();
    let matches = |candidate: &str| -> Option<String> {
        if available_locales.contains(&candidate) {
            return Some(candidate.to_string());
        }
        candidate
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .map(str::to_string)
    };

    requested
        .and_then(matches)
        .or_else(|| sys_locale::get_locale().and_then(|locale| matches(&locale)))
        .unwrap_or_else(|| "en".to_string())
}

/// Sets the process-wide locale for `t!` lookups and returns it.
pub fn init(requested: Option<&str>) -> String {
    let lang = resolve_locale(requested);
    rust_i18n::set_locale(&lang);
    lang
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
