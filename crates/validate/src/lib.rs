//! Post-hoc validation of the generated visualization artifacts.
//!
//! Re-opens the results document and the sibling static files and checks
//! them for structural consistency: key presence, non-emptiness, and a
//! handful of content substrings the front-end depends on. The checks are
//! purely advisory; nothing here is part of the data pipeline and a failed
//! check is reported, never thrown.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

/// Benchmark the front-end selects by default; its absence breaks the page.
pub const DEFAULT_BENCHMARK: &str = "llama2-70b-99";

/// File name of the generated results document.
pub const DATA_FILE: &str = "data.json";

/// File name of the main page.
pub const HTML_FILE: &str = "index.html";

/// File name of the client-side script.
pub const JS_FILE: &str = "app.js";

/// Outcome of a single named check.
#[derive(Debug, Clone)]
pub struct Check {
    /// Short name of the check.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Human-readable detail, useful mainly on failure.
    pub detail: String,
}

/// Collected results of a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Every check performed, in execution order.
    pub checks: Vec<Check>,
}

impl ValidationReport {
    /// True when every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Number of failed checks.
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    fn record(&mut self, name: &str, passed: bool, detail: impl Into<String>) {
        let detail = detail.into();
        debug!(check = name, passed, %detail, "validation check");
        self.checks.push(Check {
            name: name.to_string(),
            passed,
            detail,
        });
    }
}

/// Validate the artifacts under `root`.
///
/// Expects `data.json`, `index.html` and `app.js` in that directory. An
/// unreadable file fails its checks with the I/O message rather than
/// aborting the run.
pub fn validate_dir(root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_document_file(&root.join(DATA_FILE), &mut report);
    validate_html_file(&root.join(HTML_FILE), &mut report);
    validate_js_file(&root.join(JS_FILE), &mut report);
    report
}

/// Validate the results document at `path`.
pub fn validate_document_file(path: &Path, report: &mut ValidationReport) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.record("data readable", false, e.to_string());
            return;
        }
    };
    match serde_json::from_str::<Value>(&content) {
        Ok(document) => validate_document(&document, report),
        Err(e) => report.record("data is valid JSON", false, e.to_string()),
    }
}

/// Validate an already-deserialized results document.
pub fn validate_document(document: &Value, report: &mut ValidationReport) {
    for key in ["metadata", "benchmarks", "systems"] {
        report.record(
            &format!("document has '{key}'"),
            document.get(key).is_some(),
            format!("top-level key '{key}'"),
        );
    }

    let metadata = document.get("metadata").cloned().unwrap_or(Value::Null);
    for key in [
        "version",
        "generated_date",
        "total_systems",
        "total_benchmarks",
    ] {
        report.record(
            &format!("metadata has '{key}'"),
            metadata.get(key).is_some(),
            format!("metadata key '{key}'"),
        );
    }

    let benchmarks = document
        .get("benchmarks")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let systems = document
        .get("systems")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    report.record(
        "benchmarks non-empty",
        !benchmarks.is_empty(),
        format!("{} benchmarks", benchmarks.len()),
    );
    report.record(
        "systems non-empty",
        !systems.is_empty(),
        format!("{} systems", systems.len()),
    );

    let total_benchmarks = metadata.get("total_benchmarks").and_then(Value::as_u64);
    report.record(
        "benchmark count matches",
        total_benchmarks == Some(benchmarks.len() as u64),
        format!(
            "metadata says {:?}, list holds {}",
            total_benchmarks,
            benchmarks.len()
        ),
    );
    let total_systems = metadata.get("total_systems").and_then(Value::as_u64);
    report.record(
        "system count matches",
        total_systems == Some(systems.len() as u64),
        format!(
            "metadata says {:?}, list holds {}",
            total_systems,
            systems.len()
        ),
    );

    let has_default = benchmarks
        .iter()
        .any(|b| b.get("name").and_then(Value::as_str) == Some(DEFAULT_BENCHMARK));
    report.record(
        "default benchmark present",
        has_default,
        format!("'{DEFAULT_BENCHMARK}' in benchmark list"),
    );
}

/// Validate that the page references its stylesheet, script and chart
/// library.
pub fn validate_html_file(path: &Path, report: &mut ValidationReport) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.record("html readable", false, e.to_string());
            return;
        }
    };
    report.record(
        "html references stylesheet",
        content.contains("styles.css"),
        "styles.css",
    );
    report.record(
        "html references script",
        content.contains(JS_FILE),
        JS_FILE,
    );
    report.record(
        "html includes plotly",
        content.to_lowercase().contains("plotly"),
        "plotly",
    );
}

/// Validate the client-side script's configuration hooks.
pub fn validate_js_file(path: &Path, report: &mut ValidationReport) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.record("js readable", false, e.to_string());
            return;
        }
    };
    report.record(
        "js default benchmark",
        content.contains(&format!("currentBenchmark = '{DEFAULT_BENCHMARK}'")),
        DEFAULT_BENCHMARK,
    );
    report.record(
        "js pagination hooks",
        content.contains("pageSize") && content.contains("getPaginatedSystems"),
        "pageSize / getPaginatedSystems",
    );
    report.record(
        "js chart rendering",
        content.contains("Plotly.newPlot"),
        "Plotly.newPlot",
    );
}
