//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which executes every test case in
//! the cases directory against each engine configuration variant.
//!
//! 此模块实现了 `run` 命令，针对每个引擎配置变体执行用例目录中的每个测试用例。

use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{config::{self, HarnessConfig}, execution::run_batch},
    infra::t,
    reporting::console::{print_skipped_case_details, print_summary},
};

/// Command-line overrides for a run. `None` keeps the configured value.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Explicit configuration file; `Harness.toml` is optional when absent.
    pub config: Option<PathBuf>,
    pub cases_dir: Option<PathBuf>,
    pub delay_secs: Option<u64>,
    pub repetitions: Option<u32>,
    pub keep_going: bool,
    /// Language requested with `--lang`, which wins over the config file.
    pub lang: Option<String>,
}

/// Executes the run command with the provided options.
///
/// # Returns
/// `Ok` once the whole directory has been walked, even if some engine runs
/// failed (their output files hold the details). An error is returned when the
/// configuration or the cases directory is unusable, when a test case cannot be
/// loaded, or when cases were skipped under `--keep-going`.
pub async fn execute(options: RunOptions) -> Result<()> {
    let config = setup_config(&options)?;
    let locale = crate::init(options.lang.as_deref().or(config.language.as_deref()));

    println!(
        "{}",
        t!(
            "run.started_at",
            locale = locale,
            time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    );
    println!(
        "{}",
        t!(
            "run.loading_cases",
            locale = locale,
            path = config.cases_dir.display()
        )
    );
    for variant in &config.variants {
        println!(
            "{}",
            t!(
                "run.variant",
                locale = locale,
                name = variant.name.yellow(),
                path = variant.config.display()
            )
            .cyan()
        );
    }
    println!(
        "{}",
        t!(
            "run.plan_settings",
            locale = locale,
            repetitions = config.repetitions,
            secs = config.delay_secs
        )
        .cyan()
    );

    let summary = run_batch(&config).await?;

    print_summary(&summary, &locale);

    if summary.has_skipped_cases() {
        print_skipped_case_details(&summary, &locale);
        bail!(t!("run.cases_skipped", locale = locale, count = summary.skipped.len()).to_string());
    }

    println!("\n{}", t!("run.batch_finished", locale = locale).green().bold());
    Ok(())
}

/// Loads the configuration and applies the command-line overrides.
fn setup_config(options: &RunOptions) -> Result<HarnessConfig> {
    let mut config = config::load_or_default(options.config.as_deref())
        .with_context(|| t!("run.config_failed").to_string())?;

    if let Some(dir) = &options.cases_dir {
        // Paths given on the command line are relative to the current directory.
        config.cases_dir = std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve path: {}", dir.display()))?;
    }
    if let Some(delay_secs) = options.delay_secs {
        config.delay_secs = delay_secs;
    }
    if let Some(repetitions) = options.repetitions {
        config.repetitions = repetitions;
    }
    config.keep_going |= options.keep_going;

    Ok(config)
}
