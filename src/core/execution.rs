//! # Benchmark Execution Module / 基准执行模块
//!
//! This module drives the engine: for every planned test case it runs each
//! configuration variant the configured number of times, writes one result
//! file per run and pauses after every invocation.
//!
//! Runs are strictly sequential. A run whose engine cannot be launched is
//! recorded and the batch moves on; a test case that cannot be loaded aborts
//! the batch unless `keep_going` is set.
//!
//! 此模块驱动引擎：对每个计划中的测试用例，按配置的次数运行每个配置变体，
//! 每次运行写入一个结果文件，并在每次调用后暂停。

use anyhow::{Context, Result};
use colored::*;
use std::time::{Duration, Instant};

use crate::{
    core::{
        case::{TestCase, load_case},
        config::{HarnessConfig, Variant},
        models::{BatchSummary, RunOutcome, RunRecord, SkippedCase},
        planner::plan_cases,
    },
    infra::{command, fs, t},
};

/// Plans and executes the whole cases directory.
///
/// # Returns
/// The records of every run in execution order, plus the cases skipped under
/// `keep_going`. Errors from planning, from loading a case (without
/// `keep_going`) and from writing a result file are returned as-is.
///
/// 计划并执行整个用例目录。
pub async fn run_batch(config: &HarnessConfig) -> Result<BatchSummary> {
    println!(
        "{}",
        t!("run.executing_from", path = config.cases_dir.display()).bold()
    );

    let suffix = config.case_suffix();
    let plan = plan_cases(&config.cases_dir, &suffix)?;
    let mut summary = BatchSummary {
        ignored_entries: plan.ignored_entries,
        ..BatchSummary::default()
    };

    if plan.cases.is_empty() {
        println!("{}", t!("run.no_cases_found").green());
        return Ok(summary);
    }

    for path in plan.cases {
        let case = match load_case(&path, &suffix, &config.vocabulary) {
            Ok(case) => case,
            Err(e) if config.keep_going => {
                eprintln!(
                    "{}",
                    t!("run.case_skipped", path = path.display(), error = e).yellow()
                );
                summary.skipped.push(SkippedCase {
                    path,
                    error: e.to_string(),
                });
                continue;
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(t!("run.case_aborted", path = path.display()).to_string()));
            }
        };

        let records = run_case(&case, config).await?;
        summary.records.extend(records);
    }

    Ok(summary)
}

/// Runs one test case against every variant, `config.repetitions` times each.
///
/// # Returns
/// One `RunRecord` per run. Engine failures are part of the records; only a
/// failure to write a result file is returned as an error.
///
/// 针对每个变体运行一个测试用例，每个变体运行 `config.repetitions` 次。
pub async fn run_case(case: &TestCase, config: &HarnessConfig) -> Result<Vec<RunRecord>> {
    let context = case.context_json()?;
    let mut records = Vec::new();

    for variant in &config.variants {
        for repetition in 0..config.repetitions {
            println!(
                "{}",
                t!(
                    "run.executing",
                    id = &case.id,
                    config = variant.config_file_name()
                )
                .blue()
            );

            let record = run_once(case, &context, variant, repetition, config).await?;
            print_run_finished(&record);
            records.push(record);

            pause(config.delay_secs).await;
        }
    }

    Ok(records)
}

/// Executes a single engine invocation and writes its result file.
async fn run_once(
    case: &TestCase,
    context: &str,
    variant: &Variant,
    repetition: u32,
    config: &HarnessConfig,
) -> Result<RunRecord> {
    let output_path = fs::output_path(
        case.output_dir(),
        &case.id,
        &variant.name,
        repetition,
        &config.output_extension,
    );

    let start_time = Instant::now();
    let invocation = async {
        let cmd = command::build_engine_command(
            &config.engine,
            &config.base_dir,
            &case.query,
            context,
            &variant.config,
        )?;
        command::spawn_and_capture(cmd).await
    };

    let (outcome, contents) = match invocation.await {
        Ok(captured) => {
            let outcome = if captured.status.success() {
                RunOutcome::Succeeded
            } else {
                RunOutcome::EngineFailed {
                    code: captured.status.code(),
                }
            };
            (outcome, captured.recorded().to_vec())
        }
        Err(e) => {
            eprintln!(
                "{}",
                t!("run.launch_failed", id = &case.id, error = format!("{e:#}")).red()
            );
            let trace = command::format_error_trace(&e);
            (
                RunOutcome::LaunchFailed {
                    message: format!("{e:#}"),
                },
                trace.into_bytes(),
            )
        }
    };
    let duration = start_time.elapsed();

    fs::write_record(&output_path, &contents).with_context(|| {
        format!(
            "Failed to record run {}-{}-{}",
            case.id, variant.name, repetition
        )
    })?;

    Ok(RunRecord {
        case_id: case.id.clone(),
        variant: variant.name.clone(),
        repetition,
        outcome,
        output_path,
        duration,
    })
}

fn print_run_finished(record: &RunRecord) {
    let duration = format!("{:.2?}", record.duration);
    match &record.outcome {
        RunOutcome::Succeeded => println!(
            "{}",
            t!(
                "run.run_succeeded",
                name = record.run_name(),
                duration = duration,
                path = record.output_path.display()
            )
            .green()
        ),
        RunOutcome::EngineFailed { .. } => println!(
            "{}",
            t!(
                "run.run_engine_failed",
                name = record.run_name(),
                duration = duration,
                path = record.output_path.display()
            )
            .yellow()
        ),
        RunOutcome::LaunchFailed { .. } => println!(
            "{}",
            t!(
                "run.run_launch_failed",
                name = record.run_name(),
                path = record.output_path.display()
            )
            .red()
        ),
    }
}

/// The fixed pause after every invocation, regardless of its outcome.
async fn pause(delay_secs: u64) {
    if delay_secs == 0 {
        return;
    }
    println!("{}", t!("run.sleeping", secs = delay_secs).dimmed());
    tokio::time::sleep(Duration::from_secs(delay_secs)).await;
}
