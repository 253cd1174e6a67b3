//! # Test Case Module / 测试用例模块
//!
//! Loads a single Turtle test case and extracts what the engine needs from it:
//! the SPARQL query text and the list of data sources.
//!
//! 加载单个 Turtle 测试用例，并提取引擎所需的内容：
//! SPARQL 查询文本和数据源列表。

use oxrdf::{Term, Triple};
use oxttl::TurtleParser;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::Vocabulary;
use crate::infra::t;

/// Errors that make a test case unusable. Any of them aborts the case.
/// 使测试用例无法使用的错误。任何一个都会中止该用例。
#[derive(Error, Debug)]
pub enum CaseError {
    #[error("Failed to read test case {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse test case {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Test case {} declares no query (<{predicate}>)", .path.display())]
    MissingQuery { path: PathBuf, predicate: String },

    #[error("Failed to serialize the query context: {0}")]
    Context(#[from] serde_json::Error),
}

/// A loaded test case. Immutable once built.
/// 已加载的测试用例，构建后不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// The file name without the case suffix.
    /// 去掉用例后缀的文件名。
    pub id: String,
    /// Location of the Turtle document.
    pub path: PathBuf,
    /// The query text, already normalized for the engine's command line.
    /// 已针对引擎命令行规范化的查询文本。
    pub query: String,
    /// Values of the target predicate, in document order, deduplicated.
    pub targets: Vec<String>,
    /// Values of the federation predicate, in document order, deduplicated.
    pub federates_with: Vec<String>,
}

/// The execution context handed to the engine through `--context`.
#[derive(Debug, Serialize)]
pub struct QueryContext<'a> {
    pub sources: Vec<&'a str>,
}

impl TestCase {
    /// Targets first, then federation sources.
    pub fn sources(&self) -> Vec<&str> {
        self.targets
            .iter()
            .chain(self.federates_with.iter())
            .map(String::as_str)
            .collect()
    }

    /// Serializes `{"sources": [...]}` to compact JSON.
    pub fn context_json(&self) -> Result<String, CaseError> {
        let context = QueryContext {
            sources: self.sources(),
        };
        Ok(serde_json::to_string(&context)?)
    }

    /// The directory result files for this case are written to.
    pub fn output_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Replaces every single quote with a double quote.
///
/// The engine's argument handling chokes on single-quoted string literals, so
/// the substitution is blind: a single quote inside a double-quoted literal is
/// rewritten as well.
///
/// 将所有单引号替换为双引号。
pub fn normalize_query(query: &str) -> String {
    query.replace('\'', "\"")
}

/// Derives a case identifier by stripping `suffix` from the file name.
pub fn case_id(path: &Path, suffix: &str) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_suffix(suffix) {
        Some(stem) => stem.to_string(),
        None => file_name,
    }
}

/// Reads and parses the test case at `path`.
///
/// # Errors
/// Returns a [`CaseError`] when the document cannot be read or parsed, or when
/// it carries no query. Each of these is fatal for the case.
///
/// 读取并解析位于 `path` 的测试用例。
pub fn load_case(path: &Path, suffix: &str, vocabulary: &Vocabulary) -> Result<TestCase, CaseError> {
    let data = fs::read(path).map_err(|source| CaseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let triples = parse_turtle(path, &data)?;

    let queries = objects_of(&triples, &vocabulary.query);
    let Some(query) = queries.first() else {
        return Err(CaseError::MissingQuery {
            path: path.to_path_buf(),
            predicate: vocabulary.query.clone(),
        });
    };
    if queries.len() > 1 {
        println!(
            "{}",
            t!(
                "case.multiple_queries",
                path = path.display(),
                count = queries.len()
            )
        );
    }

    Ok(TestCase {
        id: case_id(path, suffix),
        path: path.to_path_buf(),
        query: normalize_query(query),
        targets: objects_of(&triples, &vocabulary.target),
        federates_with: objects_of(&triples, &vocabulary.federates_with),
    })
}

/// Parses `data` as Turtle with the document's `file://` location as base IRI,
/// so relative IRIs in test cases resolve the same way wherever they live.
fn parse_turtle(path: &Path, data: &[u8]) -> Result<Vec<Triple>, CaseError> {
    let parse_error = |message: String| CaseError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut parser = TurtleParser::new();
    if let Some(base) = base_iri(path) {
        // Paths that are not valid IRIs (spaces, etc.) are parsed without a base.
        if let Ok(with_base) = TurtleParser::new().with_base_iri(base) {
            parser = with_base;
        }
    }

    parser
        .for_slice(data)
        .map(|triple| triple.map_err(|e| parse_error(e.to_string())))
        .collect()
}

fn base_iri(path: &Path) -> Option<String> {
    let absolute = std::path::absolute(path).ok()?;
    let absolute = absolute.to_str()?.replace('\\', "/");
    if absolute.starts_with('/') {
        Some(format!("file://{absolute}"))
    } else {
        Some(format!("file:///{absolute}"))
    }
}

/// Distinct objects of `predicate` in document order. IRIs yield their IRI
/// string and literals their lexical form; blank nodes carry no usable value.
fn objects_of(triples: &[Triple], predicate: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for triple in triples.iter().filter(|t| t.predicate.as_str() == predicate) {
        let value = match &triple.object {
            Term::NamedNode(node) => node.as_str(),
            Term::Literal(literal) => literal.value(),
            _ => continue,
        };
        if !values.iter().any(|seen| seen == value) {
            values.push(value.to_string());
        }
    }
    values
}
