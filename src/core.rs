//! # Core Module / 核心模块
//!
//! This module contains the core functionality of SPARQL Bench Runner,
//! including test case loading, configuration, planning and execution.
//!
//! 此模块包含 SPARQL Bench Runner 的核心功能，
//! 包括测试用例加载、配置、计划和执行逻辑。

pub mod case;
pub mod config;
pub mod execution;
pub mod models;
pub mod planner;

// Re-exports
pub use case::{CaseError, TestCase};
pub use config::HarnessConfig;
pub use execution::{run_batch, run_case};
pub use models::{BatchSummary, RunOutcome, RunRecord};
