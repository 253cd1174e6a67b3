//! # Configuration Module / 配置模块
//!
//! Defines the harness configuration loaded from `Harness.toml`. Every field has
//! a default, so the harness runs without any configuration file at all: the
//! defaults reproduce the fixed layout of a checkout with the engine under
//! `engines/` and the test cases under `test-queries/`.
//!
//! 定义从 `Harness.toml` 加载的工具配置。每个字段都有默认值，
//! 因此即使没有配置文件也可以运行。

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// The configuration file looked up in the current directory when `--config`
/// is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Harness.toml";

/// A named engine configuration artifact. The harness only passes the path to
/// the engine, it never reads the file.
/// 一个具名的引擎配置文件。本工具只向引擎传递其路径，从不读取其内容。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Variant {
    /// Short name used in output file names (e.g., "void", "base").
    /// 用于输出文件名的短名称（例如 "void"、"base"）。
    pub name: String,
    /// Path to the engine configuration file.
    /// 引擎配置文件的路径。
    pub config: PathBuf,
}

impl Variant {
    pub fn new(name: impl Into<String>, config: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            config: config.into(),
        }
    }

    /// The file name of the configuration artifact, used in progress messages.
    pub fn config_file_name(&self) -> String {
        self.config
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.display().to_string())
    }
}

/// How the external query engine is invoked.
/// 外部查询引擎的调用方式。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// The program and its leading arguments, split with shell quoting rules.
    /// `--query`, `--context` and `-t` are appended to it for every run.
    /// 程序及其前置参数，按 shell 引号规则拆分。
    #[serde(default = "default_engine_command")]
    pub command: String,
    /// Environment variable that receives the variant's configuration path.
    /// 接收变体配置路径的环境变量。
    #[serde(default = "default_config_env")]
    pub config_env: String,
    /// Value of the engine's `-t` (result format) flag.
    #[serde(default = "default_output_type")]
    pub output_type: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            config_env: default_config_env(),
            output_type: default_output_type(),
        }
    }
}

/// Predicate IRIs used to locate the query and its sources in a test case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Vocabulary {
    #[serde(default = "default_query_predicate")]
    pub query: String,
    #[serde(default = "default_target_predicate")]
    pub target: String,
    #[serde(default = "default_federates_with_predicate")]
    pub federates_with: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            query: default_query_predicate(),
            target: default_target_predicate(),
            federates_with: default_federates_with_predicate(),
        }
    }
}

/// The complete harness configuration.
/// 完整的工具配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Falls back to the system locale when not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则使用系统语言。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Directory scanned for test cases.
    /// 扫描测试用例的目录。
    #[serde(default = "default_cases_dir")]
    pub cases_dir: PathBuf,

    /// File name suffix (without the dot) that marks a test case.
    #[serde(default = "default_case_extension")]
    pub case_extension: String,

    /// Extension (without the dot) of the written result files.
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// How many times each case runs per variant.
    /// 每个用例在每个变体下运行的次数。
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    /// Pause after every engine invocation, in seconds.
    /// 每次引擎调用之后的暂停时间（秒）。
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Skip test cases that cannot be loaded instead of aborting the batch.
    /// 跳过无法加载的测试用例，而不是中止整个批次。
    #[serde(default)]
    pub keep_going: bool,

    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// Engine configuration variants, executed in declaration order.
    /// 引擎配置变体，按声明顺序执行。
    #[serde(default = "default_variants")]
    pub variants: Vec<Variant>,

    /// Directory that relative paths were resolved against. The engine runs
    /// with this as its working directory.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: None,
            cases_dir: default_cases_dir(),
            case_extension: default_case_extension(),
            output_extension: default_output_extension(),
            repetitions: default_repetitions(),
            delay_secs: default_delay_secs(),
            keep_going: false,
            engine: EngineConfig::default(),
            vocabulary: Vocabulary::default(),
            variants: default_variants(),
            base_dir: PathBuf::new(),
        }
    }
}

impl HarnessConfig {
    /// The case suffix including its leading dot, e.g. `.ttl`.
    pub fn case_suffix(&self) -> String {
        format!(".{}", self.case_extension)
    }

    /// Checks the invariants the executor relies on.
    pub fn validate(&self) -> Result<()> {
        if self.case_extension.is_empty() {
            bail!("`case_extension` must not be empty");
        }
        if self.engine.command.trim().is_empty() {
            bail!("`engine.command` must not be empty");
        }
        if self.engine.config_env.is_empty() {
            bail!("`engine.config_env` must not be empty");
        }

        let mut seen = HashSet::new();
        for variant in &self.variants {
            if variant.name.is_empty()
                || variant.name.contains(|c: char| c == '/' || c == '\\')
            {
                bail!(
                    "Variant name {:?} must be non-empty and must not contain path separators",
                    variant.name
                );
            }
            if !seen.insert(variant.name.as_str()) {
                bail!("Variant {:?} is declared more than once", variant.name);
            }
        }
        Ok(())
    }

    /// Expands `~` and environment variables in paths and in the engine command,
    /// then makes relative paths absolute against `base_dir`.
    pub fn resolve_paths(mut self, base_dir: &Path) -> Result<Self> {
        self.base_dir = base_dir.to_path_buf();
        self.cases_dir = expand_path(&self.cases_dir, base_dir)?;
        for variant in &mut self.variants {
            variant.config = expand_path(&variant.config, base_dir)?;
        }
        self.engine.command = shellexpand::full(&self.engine.command)
            .with_context(|| format!("Failed to expand command: {}", self.engine.command))?
            .into_owned();
        Ok(self)
    }
}

/// Parses a configuration file without resolving its paths.
pub fn parse_config(content: &str) -> Result<HarnessConfig> {
    let config: HarnessConfig = toml::from_str(content)?;
    Ok(config)
}

/// Loads, resolves and validates the configuration file at `path`.
/// Relative paths inside it are resolved against the file's directory.
///
/// 加载、解析并验证位于 `path` 的配置文件。
/// 文件中的相对路径相对于该文件所在目录进行解析。
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    let base_dir = crate::infra::fs::absolute_path(path)?
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = config.resolve_paths(&base_dir)?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration the way the CLI does: an explicitly given file must
/// exist, while the default `Harness.toml` is optional and the built-in defaults
/// (resolved against the current directory) are used without it.
pub fn load_or_default(explicit: Option<&Path>) -> Result<HarnessConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        return load_config(default_path);
    }

    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    let config = HarnessConfig::default().resolve_paths(&cwd)?;
    config.validate()?;
    Ok(config)
}

fn expand_path(path: &Path, base_dir: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    let expanded = PathBuf::from(expanded.as_ref());
    Ok(if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    })
}

fn default_cases_dir() -> PathBuf {
    PathBuf::from("test-queries")
}

fn default_case_extension() -> String {
    "ttl".to_string()
}

fn default_output_extension() -> String {
    "tsv".to_string()
}

fn default_repetitions() -> u32 {
    1
}

fn default_delay_secs() -> u64 {
    10
}

fn default_engine_command() -> String {
    "node engines/query-sparql/bin/query-dynamic.js".to_string()
}

fn default_config_env() -> String {
    "COMUNICA_CONFIG".to_string()
}

fn default_output_type() -> String {
    "stats".to_string()
}

fn default_query_predicate() -> String {
    "http://www.w3.org/ns/shacl#select".to_string()
}

fn default_target_predicate() -> String {
    "https://schema.org/target".to_string()
}

fn default_federates_with_predicate() -> String {
    "https://purl.expasy.org/sparql-examples/ontology#federatesWith".to_string()
}

fn default_variants() -> Vec<Variant> {
    vec![
        Variant::new(
            "void",
            "engines/config-query-sparql/config/config-default-v4-1-0.json",
        ),
        Variant::new(
            "base",
            "engines/config-query-sparql/config/config-default.json",
        ),
    ]
}
