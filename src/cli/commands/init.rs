//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command, which writes a commented
//! `Harness.toml` holding the built-in defaults.
//!
//! 此模块实现了 `init` 命令，用于写入包含内置默认值并带注释的 `Harness.toml`。

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::PathBuf};

use crate::infra::t;

pub const DEFAULT_CONFIG: &str = r#"# SPARQL Bench Runner configuration / SPARQL Bench Runner 配置
# Relative paths are resolved against the directory of this file.
# 相对路径相对于本文件所在目录解析。

# Language for console messages ("en", "zh-CN"). Defaults to the system locale.
# 控制台消息的语言。默认使用系统语言。
# language = "en"

# Directory scanned for test cases / 扫描测试用例的目录
cases_dir = "test-queries"
# Suffix of test case files / 测试用例文件的后缀
case_extension = "ttl"
# Extension of result files / 结果文件的扩展名
output_extension = "tsv"
# Runs per case and variant / 每个用例和变体的运行次数
repetitions = 1
# Pause after every engine invocation, in seconds / 每次调用引擎后的暂停（秒）
delay_secs = 10
# Skip unloadable test cases instead of aborting / 跳过无法加载的用例而不是中止
keep_going = false

[engine]
# Program and leading arguments; `--query`, `--context` and `-t` are appended.
# 程序及其前置参数；会追加 `--query`、`--context` 和 `-t`。
command = "node engines/query-sparql/bin/query-dynamic.js"
# Environment variable receiving the variant's config path
# 接收变体配置路径的环境变量
config_env = "COMUNICA_CONFIG"
# Result format passed with `-t` / 通过 `-t` 传递的结果格式
output_type = "stats"

[vocabulary]
query = "http://www.w3.org/ns/shacl#select"
target = "https://schema.org/target"
federates_with = "https://purl.expasy.org/sparql-examples/ontology#federatesWith"

# Engine configurations, executed in this order / 引擎配置，按此顺序执行
[[variants]]
name = "void"
config = "engines/config-query-sparql/config/config-default-v4-1-0.json"

[[variants]]
name = "base"
config = "engines/config-query-sparql/config/config-default.json"
"#;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `locale` - Language for console messages
pub fn execute(output: PathBuf, force: bool, locale: &str) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", locale = locale, path = output.display()).red()
        );
        println!("{}", t!("init.use_force", locale = locale).yellow());
        return Ok(());
    }

    // Create parent directories if needed
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!(
                    "init.create_parent_dir_failed",
                    locale = locale,
                    path = parent.display()
                )
                .to_string()
            })?;
        }
    }

    // Write the default configuration to the output file
    fs::write(&output, DEFAULT_CONFIG).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));

    Ok(())
}
