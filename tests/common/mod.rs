// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A stand-in for the query engine. It echoes what it was called with, one
/// `key<TAB>value` line per item, and fails on demand when the query contains
/// `FAIL`.
pub const FAKE_ENGINE: &str = r#"#!/bin/sh
# $1=--query $2=<query> $3=--context $4=<context> $5=-t $6=<type>
case "$2" in
  *FAIL*)
    printf 'partial output\n'
    printf 'engine failure with %s\n' "$COMUNICA_CONFIG" >&2
    exit 3
    ;;
esac
printf 'query\t%s\n' "$2"
printf 'context\t%s\n' "$4"
printf 'config\t%s\n' "$COMUNICA_CONFIG"
printf 'type\t%s\n' "$6"
"#;

/// A temporary harness checkout: fake engine, two variant configs and an empty
/// `cases/` directory.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::write(dir.path().join("fake_engine.sh"), FAKE_ENGINE)
            .expect("Failed to write fake engine");

        let configs = dir.path().join("configs");
        fs::create_dir_all(&configs).expect("Failed to create configs directory");
        fs::write(configs.join("void.json"), "{}").unwrap();
        fs::write(configs.join("base.json"), "{}").unwrap();

        fs::create_dir_all(dir.path().join("cases")).expect("Failed to create cases directory");
        Self { dir }
    }

    /// The canonical root, matching how the harness resolves config-relative paths.
    pub fn root(&self) -> PathBuf {
        fs::canonicalize(self.dir.path()).unwrap()
    }

    pub fn cases_dir(&self) -> PathBuf {
        self.root().join("cases")
    }

    pub fn add_case(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.cases_dir().join(file_name);
        fs::write(&path, contents).expect("Failed to write test case");
        path
    }

    /// Writes `Harness.toml` using the fake engine and no pause between runs.
    /// `top_level` is inserted before the tables, e.g. `"repetitions = 2"`.
    pub fn write_config(&self, top_level: &str) -> PathBuf {
        self.write_config_with_engine(top_level, "sh fake_engine.sh")
    }

    pub fn write_config_with_engine(&self, top_level: &str, engine_command: &str) -> PathBuf {
        let content = format!(
            r#"cases_dir = "cases"
delay_secs = 0
{top_level}

[engine]
command = "{engine_command}"

[[variants]]
name = "void"
config = "configs/void.json"

[[variants]]
name = "base"
config = "configs/base.json"
"#
        );
        let path = self.root().join("Harness.toml");
        fs::write(&path, content).expect("Failed to write Harness.toml");
        path
    }

    pub fn variant_config(&self, name: &str) -> PathBuf {
        self.root().join("configs").join(format!("{name}.json"))
    }

    pub fn read_output(&self, file_name: &str) -> String {
        fs::read_to_string(self.cases_dir().join(file_name))
            .unwrap_or_else(|e| panic!("Failed to read {file_name}: {e}"))
    }

    pub fn output_files(&self) -> Vec<String> {
        list_with_extension(&self.cases_dir(), "tsv")
    }
}

/// Builds a Turtle test case in the shape of the SPARQL examples collections.
pub fn case_document(query: &str, targets: &[&str], federates_with: &[&str]) -> String {
    let mut doc = String::from(
        r#"@prefix ex: <https://example.org/> .
@prefix sh: <http://www.w3.org/ns/shacl#> .
@prefix schema: <https://schema.org/> .
@prefix spex: <https://purl.expasy.org/sparql-examples/ontology#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

ex:example a sh:SPARQLExecutable, sh:SPARQLSelectExecutable ;
    rdfs:comment "An example query"@en ;
"#,
    );
    doc.push_str(&format!("    sh:select \"\"\"{query}\"\"\""));
    for target in targets {
        doc.push_str(&format!(" ;\n    schema:target <{target}>"));
    }
    for source in federates_with {
        doc.push_str(&format!(" ;\n    spex:federatesWith <{source}>"));
    }
    doc.push_str(" .\n");
    doc
}

/// A well-formed case without any `sh:select`.
pub fn case_without_query() -> String {
    r#"@prefix ex: <https://example.org/> .
@prefix schema: <https://schema.org/> .

ex:example schema:target <https://sparql.uniprot.org/sparql/> .
"#
    .to_string()
}

pub fn list_with_extension(dir: &Path, extension: &str) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(&format!(".{extension}")))
        .collect();
    names.sort();
    names
}
