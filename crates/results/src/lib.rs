//! MLPerf Inference results parser.
//!
//! This crate converts the semi-structured, multi-row-header tab-delimited
//! export of MLPerf Inference v5.1 submission results into the normalized
//! JSON document consumed by the static visualization page.
//!
//! # Quick Start
//!
//! ```no_run
//! use mlperf_viz_results::Parser;
//!
//! let document = Parser::from_path("inference51results.csv").parse()?;
//! println!(
//!     "{} systems, {} benchmarks",
//!     document.metadata.total_systems, document.metadata.total_benchmarks
//! );
//! # Ok::<(), mlperf_viz_results::ParseError>(())
//! ```
//!
//! # Modules
//!
//! - [`decode`] - Encoding detection and tab-delimited row splitting
//! - [`header`] - Header resolution into the column taxonomy
//! - [`record`] - 4-row block assembly into system records
//! - [`document`] - The output document model and builder
//! - [`io`] - Reading and writing the document

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod decode;
pub mod document;
mod error;
pub mod header;
pub mod io;
pub mod record;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use document::{BenchmarkEntry, Metadata, OutputDocument};
pub use error::{ParseError, Result};
pub use header::{BenchmarkInfo, BenchmarkSummary, ColumnMapping, ResultColumn};
pub use record::SystemRecord;

/// Parser for one results export file.
///
/// The pipeline is single-threaded and one-directional: raw rows feed the
/// header resolver, its column mapping feeds the record assembler, and the
/// accumulators feed the output builder. Nothing is retained between runs.
#[derive(Debug, Clone)]
pub struct Parser {
    path: PathBuf,
    filter: Option<HashSet<String>>,
}

impl Parser {
    /// Create a parser for the export at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            filter: None,
        }
    }

    /// Restrict the column mapping to an allow-list of benchmark names.
    ///
    /// Without a filter every benchmark is included.
    pub fn with_filter(mut self, benchmarks: impl IntoIterator<Item = String>) -> Self {
        self.filter = Some(benchmarks.into_iter().collect());
        self
    }

    /// Run the full parse and build the output document.
    ///
    /// # Errors
    ///
    /// Fails only when the input file cannot be read or decoded; malformed
    /// content within a readable file is absorbed per the drop rules.
    pub fn parse(&self) -> Result<OutputDocument> {
        let rows = decode::read_rows(&self.path)?;

        let header_end = rows.len().min(header::HEADER_ROWS);
        let (columns, summary) = header::resolve_header(&rows[..header_end], self.filter.as_ref());
        debug!(columns = columns.len(), benchmarks = summary.len(), "resolved header");

        let systems = record::assemble_records(&rows[header_end..], &columns);
        debug!(systems = systems.len(), "assembled system records");

        Ok(document::build_document(&summary, systems))
    }
}

/// Parse `input` and write the pretty-printed document to `output`.
///
/// Convenience entry point for the CLI.
///
/// # Errors
///
/// Returns an error if parsing fails or the output cannot be written.
pub fn parse_and_write(input: &Path, output: &Path) -> Result<OutputDocument> {
    let document = Parser::from_path(input).parse()?;
    io::write_document(&document, output)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Build a tab-delimited line with values at the given column offsets.
    fn line(cells: &[(usize, &str)]) -> String {
        let width = cells.iter().map(|(c, _)| c + 1).max().unwrap_or(0);
        let mut out = vec![""; width];
        for (col, value) in cells {
            out[*col] = value;
        }
        out.join("\t")
    }

    /// A small but representative export: 5 header rows, one junk row,
    /// then three 4-row blocks (one valid, one missing its organization,
    /// one with a qualified result marker).
    fn sample_export() -> String {
        let mut lines = vec![
            line(&[(0, "MLPerf Inference v5.1 Results")]),
            String::new(),
            line(&[(15, "llama2-70b-99"), (17, "rgat")]),
            line(&[(15, "Offline"), (16, "Server"), (17, "Offline")]),
            line(&[
                (0, "Public ID"),
                (1, "Organization"),
                (15, "Tokens/s"),
                (16, "Tokens/s"),
                (17, "Samples/s"),
            ]),
            line(&[(0, "stray note row")]),
        ];

        // Valid block.
        lines.push(line(&[(12, "2")]));
        lines.push(line(&[(6, "8")]));
        lines.push(line(&[(4, "1")]));
        lines.push(line(&[
            (0, "5.1-0001"),
            (1, "NVIDIA"),
            (3, "DGX H100"),
            (5, "H100-SXM"),
            (14, "Avg. Result"),
            (15, "12,345.67"),
            (17, "456"),
        ]));

        // Dropped: empty organization.
        lines.push(line(&[(12, "2")]));
        lines.push(line(&[(6, "8")]));
        lines.push(line(&[(4, "1")]));
        lines.push(line(&[
            (0, "5.1-0002"),
            (3, "Mystery Box"),
            (14, "Avg. Result"),
            (15, "100"),
        ]));

        // Valid: marker is a substring match.
        lines.push(line(&[(12, "4")]));
        lines.push(line(&[(6, "16")]));
        lines.push(line(&[(4, "2")]));
        lines.push(line(&[
            (0, "5.1-0003"),
            (1, "Intel"),
            (3, "Gaudi Server"),
            (5, "Gaudi3"),
            (14, "Avg. Result (server)"),
            (16, "999.5"),
        ]));

        lines.join("\n")
    }

    fn parse_sample() -> OutputDocument {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.csv");
        fs::write(&input, sample_export()).unwrap();
        Parser::from_path(&input).parse().unwrap()
    }

    #[test]
    fn test_end_to_end_counts() {
        let doc = parse_sample();
        assert_eq!(doc.metadata.total_systems, doc.systems.len());
        assert_eq!(doc.metadata.total_benchmarks, doc.benchmarks.len());
        assert_eq!(doc.systems.len(), 2);
        assert_eq!(doc.benchmarks.len(), 2);
    }

    #[test]
    fn test_retained_records_are_complete() {
        let doc = parse_sample();
        for system in &doc.systems {
            assert!(!system.public_id.is_empty());
            assert!(!system.organization.is_empty());
            assert!(!system.system_name.is_empty());
            let has_value = system
                .results
                .values()
                .flat_map(|scenarios| scenarios.values())
                .any(Option::is_some);
            assert!(has_value);
        }
    }

    #[test]
    fn test_public_ids_are_unique() {
        let doc = parse_sample();
        let mut ids: Vec<&str> = doc.systems.iter().map(|s| s.public_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), doc.systems.len());
    }

    #[test]
    fn test_result_scenarios_appear_in_benchmark_list() {
        let doc = parse_sample();
        for system in &doc.systems {
            for (benchmark, scenarios) in &system.results {
                let entry = doc
                    .benchmarks
                    .iter()
                    .find(|b| &b.name == benchmark)
                    .expect("result benchmark missing from benchmark list");
                for scenario in scenarios.keys() {
                    assert!(entry.scenarios.contains(scenario));
                }
            }
        }
    }

    #[test]
    fn test_expected_values() {
        let doc = parse_sample();

        let first = &doc.systems[0];
        assert_eq!(first.public_id, "5.1-0001");
        assert_eq!(first.results["llama2-70b-99"]["Offline"], Some(12345.67));
        assert_eq!(first.results["llama2-70b-99"]["Server"], None);
        assert_eq!(first.results["rgat"]["Offline"], Some(456.0));

        let second = &doc.systems[1];
        assert_eq!(second.public_id, "5.1-0003");
        assert_eq!(second.results["llama2-70b-99"]["Server"], Some(999.5));
    }

    #[test]
    fn test_filter_limits_benchmarks() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.csv");
        fs::write(&input, sample_export()).unwrap();

        let doc = Parser::from_path(&input)
            .with_filter(["rgat".to_string()])
            .parse()
            .unwrap();

        assert_eq!(doc.benchmarks.len(), 1);
        assert_eq!(doc.benchmarks[0].name, "rgat");
        for system in &doc.systems {
            assert!(!system.results.contains_key("llama2-70b-99"));
        }
    }

    #[test]
    fn test_round_trip_preserves_counts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results.csv");
        let output = dir.path().join("data.json");
        fs::write(&input, sample_export()).unwrap();

        let written = parse_and_write(&input, &output).unwrap();
        let read = io::read_document(&output).unwrap();

        assert_eq!(read.systems.len(), written.systems.len());
        assert_eq!(read.benchmarks.len(), written.benchmarks.len());
        assert_eq!(read.metadata.total_systems, written.metadata.total_systems);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Parser::from_path("/nonexistent/results.csv")
            .parse()
            .unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
