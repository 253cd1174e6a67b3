//! # Commands / 命令
//!
//! - `run` - Execute the benchmark over the cases directory / 对用例目录执行基准测试
//! - `init` - Write a default `Harness.toml` / 写入默认的 `Harness.toml`

pub mod init;
pub mod run;
