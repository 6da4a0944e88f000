//! Header resolution for the 5-row header region.
//!
//! The export does not carry a tabular header. Rows 2 and 3 hold benchmark
//! and scenario names that are only written in the first column of each
//! multi-column span, and row 4 holds per-column unit labels. Resolution
//! recovers a column index → (benchmark, scenario, unit) mapping plus a
//! benchmark → {scenarios, unit} summary.

use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Number of rows in the header region.
pub const HEADER_ROWS: usize = 5;

/// Row index holding benchmark names.
pub const BENCHMARK_ROW: usize = 2;

/// Row index holding scenario names.
pub const SCENARIO_ROW: usize = 3;

/// Row index holding per-column unit labels.
pub const UNIT_ROW: usize = 4;

/// Unit labels that mark the first benchmark-result column.
pub const UNIT_LABELS: [&str; 3] = ["Samples/s", "Queries/s", "Tokens/s"];

/// A single resolved result column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    /// Benchmark the column reports on.
    pub benchmark: String,
    /// Scenario the column reports on.
    pub scenario: String,
    /// Unit label for the column's values.
    pub unit: String,
}

/// Ordered mapping from column index to its resolved taxonomy entry.
///
/// Only columns whose benchmark, scenario and unit were all non-empty at
/// resolution time are present; partially labeled columns are omitted
/// entirely rather than stored with gaps.
pub type ColumnMapping = BTreeMap<usize, ResultColumn>;

/// Summary of one benchmark across all of its columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkInfo {
    /// Unique scenario names seen for this benchmark.
    pub scenarios: BTreeSet<String>,
    /// Unit label; overwritten on every column, last write wins.
    pub unit: String,
}

/// Mapping from benchmark name to its summary.
pub type BenchmarkSummary = BTreeMap<String, BenchmarkInfo>;

/// Read a cell, treating ragged rows and missing cells as empty.
pub(crate) fn cell(rows: &[Vec<String>], row: usize, col: usize) -> &str {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map(|c| c.trim())
        .unwrap_or("")
}

/// Locate the first benchmark-result column.
///
/// Scans the unit row left to right for the first cell matching a known
/// unit label. When none matches the boundary defaults to column 0: every
/// column is treated as a result column, which is valid, not an error.
fn boundary_column(rows: &[Vec<String>]) -> usize {
    let width = rows.get(UNIT_ROW).map_or(0, Vec::len);
    (0..width)
        .find(|&col| UNIT_LABELS.contains(&cell(rows, UNIT_ROW, col)))
        .unwrap_or(0)
}

/// Resolve the header region into a column mapping and benchmark summary.
///
/// `filter` is an optional allow-list of benchmark names checked by exact
/// equality. A filtered-out benchmark suppresses the mapping entry but not
/// the carryover state, so spans continue to flow to later columns.
pub fn resolve_header(
    rows: &[Vec<String>],
    filter: Option<&HashSet<String>>,
) -> (ColumnMapping, BenchmarkSummary) {
    let mut mapping = ColumnMapping::new();
    let mut summary = BenchmarkSummary::new();

    let start = boundary_column(rows);
    let width = rows.get(UNIT_ROW).map_or(0, Vec::len);

    // Benchmark and scenario names are written only in the first column of
    // a span; carry the current value until a non-empty cell overwrites it.
    let mut current_benchmark = String::new();
    let mut current_scenario = String::new();

    for col in start..width {
        let benchmark = cell(rows, BENCHMARK_ROW, col);
        let scenario = cell(rows, SCENARIO_ROW, col);
        let unit = cell(rows, UNIT_ROW, col);

        if benchmark.is_empty() && scenario.is_empty() && unit.is_empty() {
            continue;
        }

        if !benchmark.is_empty() {
            current_benchmark = benchmark.to_string();
        }
        if !scenario.is_empty() {
            current_scenario = scenario.to_string();
        }

        let included = filter.map_or(true, |allow| allow.contains(&current_benchmark));
        if included && !current_benchmark.is_empty() && !current_scenario.is_empty() && !unit.is_empty()
        {
            mapping.insert(
                col,
                ResultColumn {
                    benchmark: current_benchmark.clone(),
                    scenario: current_scenario.clone(),
                    unit: unit.to_string(),
                },
            );

            let info = summary.entry(current_benchmark.clone()).or_default();
            info.scenarios.insert(current_scenario.clone());
            info.unit = unit.to_string();
        }
    }

    (mapping, summary)
}
