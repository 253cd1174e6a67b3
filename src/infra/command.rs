//! # Command Execution Module / 命令执行模块
//!
//! Builds the engine command line and runs it, capturing stdout and stderr
//! separately and byte-for-byte.
//!
//! 构建引擎命令行并运行它，分别且逐字节地捕获 stdout 和 stderr。

use anyhow::{Context, Result, anyhow};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::core::config::EngineConfig;

/// The streams and status of a finished process.
/// 已结束进程的输出流和状态。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    /// The stream the harness records: stdout on exit code 0, stderr otherwise.
    /// 本工具记录的输出流：退出码为 0 时为 stdout，否则为 stderr。
    pub fn recorded(&self) -> &[u8] {
        if self.status.success() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Builds the engine invocation for one run.
///
/// The command line is `<engine.command...> --query <query> --context <context>
/// -t <engine.output_type>`, run from `working_dir` with `engine.config_env`
/// pointing at `variant_config`. The rest of the environment is inherited.
///
/// 为一次运行构建引擎调用。
pub fn build_engine_command(
    engine: &EngineConfig,
    working_dir: &Path,
    query: &str,
    context: &str,
    variant_config: &Path,
) -> Result<Command> {
    let parts = shlex::split(&engine.command)
        .ok_or_else(|| anyhow!("Failed to parse command: {}", engine.command))?;
    let Some((program, leading_args)) = parts.split_first() else {
        return Err(anyhow!("Empty command after parsing."));
    };

    let mut cmd = Command::new(program);
    cmd.args(leading_args)
        .arg("--query")
        .arg(query)
        .arg("--context")
        .arg(context)
        .arg("-t")
        .arg(&engine.output_type)
        .env(&engine.config_env, variant_config)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    if !working_dir.as_os_str().is_empty() {
        cmd.current_dir(working_dir);
    }
    Ok(cmd)
}

/// A printable form of the command, for logs.
pub fn describe_command(cmd: &Command) -> String {
    let std_cmd = cmd.as_std();
    std::iter::once(std_cmd.get_program())
        .chain(std_cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Spawns a command and captures its stdout and stderr.
/// The output streams are drained concurrently so neither pipe can fill up and
/// stall the child.
///
/// # Returns
/// The exit status and both streams, or the I/O error raised while spawning,
/// reading or waiting.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 两个输出流被并发读取，避免任一管道写满导致子进程阻塞。
pub async fn spawn_and_capture(mut cmd: Command) -> Result<CapturedOutput> {
    // Configure the command to capture stdout and stderr.
    // 配置命令以捕获 stdout 和 stderr。
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to spawn `{}`", describe_command(&cmd)))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stdout of the engine process"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("Failed to capture stderr of the engine process"))?;

    let stdout_handle = tokio::spawn(read_all(stdout));
    let stderr_handle = tokio::spawn(read_all(stderr));

    // Wait for the process to exit.
    // 等待进程退出。
    let status = child
        .wait()
        .await
        .context("Failed to wait for the engine process")?;

    // Wait for both readers so that every byte written before exit is captured.
    // 等待两个读取任务完成，以确保捕获退出前写出的所有字节。
    let stdout = stdout_handle
        .await
        .context("Failed to join stdout task")?
        .context("Failed to read stdout of the engine process")?;
    let stderr = stderr_handle
        .await
        .context("Failed to join stderr task")?
        .context("Failed to read stderr of the engine process")?;

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

async fn read_all<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Renders an error with its full cause chain (and a backtrace when
/// `RUST_BACKTRACE` enables one). This is what gets recorded for a run whose
/// engine could not be launched.
pub fn format_error_trace(error: &anyhow::Error) -> String {
    format!("{error:?}\n")
}
