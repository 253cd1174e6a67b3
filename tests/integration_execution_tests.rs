//! # Execution Integration Tests / 执行集成测试
//!
//! Runs whole batches against a fake engine script and checks the result files
//! they leave behind.
//!
//! 针对模拟引擎脚本运行完整批次，并检查其生成的结果文件。
#![cfg(unix)]

mod common;

use common::{Workspace, case_document, case_without_query};
use sparql_bench_runner::case::load_case;
use sparql_bench_runner::config::load_config;
use sparql_bench_runner::core::{CaseError, RunOutcome, run_batch, run_case};
use std::time::{Duration, Instant};

const UNIPROT: &str = "https://sparql.uniprot.org/sparql/";
const WIKIDATA: &str = "https://query.wikidata.org/sparql";

#[tokio::test]
async fn test_single_case_produces_one_file_per_variant() {
    let ws = Workspace::new();
    ws.add_case(
        "q1.ttl",
        &case_document("SELECT * WHERE {?s ?p ?o}'", &[UNIPROT], &[WIKIDATA]),
    );
    let config = load_config(&ws.write_config("")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert_eq!(ws.output_files(), vec!["q1-base-0.tsv", "q1-void-0.tsv"]);
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.succeeded(), 2);

    // Variants run in declared order.
    assert_eq!(summary.records[0].variant, "void");
    assert_eq!(summary.records[1].variant, "base");

    let expected = |variant: &str| {
        format!(
            "query\tSELECT * WHERE {{?s ?p ?o}}\"\n\
             context\t{{\"sources\":[\"{UNIPROT}\",\"{WIKIDATA}\"]}}\n\
             config\t{}\n\
             type\tstats\n",
            ws.variant_config(variant).display()
        )
    };
    assert_eq!(ws.read_output("q1-void-0.tsv"), expected("void"));
    assert_eq!(ws.read_output("q1-base-0.tsv"), expected("base"));
}

#[tokio::test]
async fn test_repetitions_are_numbered_from_zero() {
    let ws = Workspace::new();
    ws.add_case("q1.ttl", &case_document("SELECT * {}", &[], &[]));
    let config = load_config(&ws.write_config("repetitions = 3")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert_eq!(
        ws.output_files(),
        vec![
            "q1-base-0.tsv",
            "q1-base-1.tsv",
            "q1-base-2.tsv",
            "q1-void-0.tsv",
            "q1-void-1.tsv",
            "q1-void-2.tsv",
        ]
    );
    let names: Vec<_> = summary.records.iter().map(|r| r.run_name()).collect();
    assert_eq!(
        names,
        vec!["q1-void-0", "q1-void-1", "q1-void-2", "q1-base-0", "q1-base-1", "q1-base-2"]
    );
}

#[tokio::test]
async fn test_engine_failure_records_stderr() {
    let ws = Workspace::new();
    ws.add_case("bad.ttl", &case_document("SELECT FAIL {}", &[], &[]));
    let config = load_config(&ws.write_config("")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert_eq!(summary.failed(), 2);
    assert_eq!(
        summary.records[0].outcome,
        RunOutcome::EngineFailed { code: Some(3) }
    );
    assert_eq!(
        ws.read_output("bad-void-0.tsv"),
        format!("engine failure with {}\n", ws.variant_config("void").display())
    );
}

#[tokio::test]
async fn test_missing_engine_records_trace_and_continues() {
    let ws = Workspace::new();
    ws.add_case("a.ttl", &case_document("SELECT * {}", &[], &[]));
    ws.add_case("b.ttl", &case_document("SELECT * {}", &[], &[]));
    let config = load_config(
        &ws.write_config_with_engine("", "this_command_definitely_does_not_exist_12345"),
    )
    .unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert_eq!(summary.records.len(), 4);
    assert!(summary
        .records
        .iter()
        .all(|r| matches!(r.outcome, RunOutcome::LaunchFailed { .. })));
    assert_eq!(ws.output_files().len(), 4);
    let trace = ws.read_output("b-base-0.tsv");
    assert!(trace.contains("Failed to spawn"), "trace was: {trace}");
}

#[tokio::test]
async fn test_existing_output_is_overwritten() {
    let ws = Workspace::new();
    ws.add_case("q1.ttl", &case_document("SELECT * {}", &[], &[]));
    std::fs::write(ws.cases_dir().join("q1-void-0.tsv"), "stale result").unwrap();
    let config = load_config(&ws.write_config("")).unwrap();

    run_batch(&config).await.unwrap();

    assert!(ws.read_output("q1-void-0.tsv").starts_with("query\tSELECT * {}\n"));
}

#[tokio::test]
async fn test_empty_directory_produces_nothing() {
    let ws = Workspace::new();
    let config = load_config(&ws.write_config("")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert!(summary.records.is_empty());
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_non_case_files_are_not_executed() {
    let ws = Workspace::new();
    ws.add_case("readme.md", "# not a case");
    ws.add_case("q1.ttl.bak", &case_document("SELECT * {}", &[], &[]));
    let config = load_config(&ws.write_config("")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert!(summary.records.is_empty());
    assert_eq!(summary.ignored_entries, 2);
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_case_without_query_aborts_the_batch() {
    let ws = Workspace::new();
    ws.add_case("a.ttl", &case_without_query());
    ws.add_case("b.ttl", &case_document("SELECT * {}", &[], &[]));
    let config = load_config(&ws.write_config("")).unwrap();

    let err = run_batch(&config).await.unwrap_err();

    assert!(err.downcast_ref::<CaseError>().is_some(), "got {err:#}");
    // `a.ttl` sorts first, so nothing ran.
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_keep_going_skips_unloadable_cases() {
    let ws = Workspace::new();
    ws.add_case("a.ttl", &case_without_query());
    ws.add_case("b.ttl", &case_document("SELECT * {}", &[], &[]));
    let config = load_config(&ws.write_config("keep_going = true")).unwrap();

    let summary = run_batch(&config).await.unwrap();

    assert_eq!(summary.skipped.len(), 1);
    assert!(summary.skipped[0].path.ends_with("a.ttl"));
    assert_eq!(ws.output_files(), vec!["b-base-0.tsv", "b-void-0.tsv"]);
}

#[tokio::test]
async fn test_run_case_with_no_variants_runs_nothing() {
    let ws = Workspace::new();
    let path = ws.add_case("q1.ttl", &case_document("SELECT * {}", &[], &[]));
    let mut config = load_config(&ws.write_config("")).unwrap();
    config.variants.clear();
    let case = load_case(&path, &config.case_suffix(), &config.vocabulary).unwrap();

    let records = run_case(&case, &config).await.unwrap();

    assert!(records.is_empty());
    assert!(ws.output_files().is_empty());
}

#[tokio::test]
async fn test_pause_follows_each_run_of_a_case() {
    let ws = Workspace::new();
    let path = ws.add_case("q1.ttl", &case_document("SELECT FAIL {}", &[], &[]));
    let mut config = load_config(&ws.write_config("")).unwrap();
    config.delay_secs = 1;
    let case = load_case(&path, &config.case_suffix(), &config.vocabulary).unwrap();

    let started = Instant::now();
    let records = run_case(&case, &config).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| !r.outcome.is_success()));
    assert!(elapsed >= Duration::from_secs(2), "elapsed {elapsed:?}");
}

#[tokio::test]
async fn test_write_failure_stops_a_case_with_many_repetitions() {
    let ws = Workspace::new();
    let path = ws.add_case("q1.ttl", &case_document("SELECT * {}", &[], &[]));
    // A directory in place of the first result file makes the write fail.
    std::fs::create_dir(ws.cases_dir().join("q1-void-0.tsv")).unwrap();
    let mut config = load_config(
        &ws.write_config_with_engine("", "this_command_definitely_does_not_exist_12345"),
    )
    .unwrap();
    config.repetitions = u32::MAX;
    let case = load_case(&path, &config.case_suffix(), &config.vocabulary).unwrap();

    let err = run_case(&case, &config).await.unwrap_err();

    assert!(format!("{err:#}").contains("q1-void-0"), "got {err:#}");
}
