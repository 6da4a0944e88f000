//! Output document model and builder.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::header::BenchmarkSummary;
use crate::record::SystemRecord;

/// Version tag of the results export this pipeline understands.
pub const VERSION_TAG: &str = "5.1";

/// Human-readable description embedded in the document metadata.
pub const DESCRIPTION: &str = "MLPerf Inference v5.1 Results - All Benchmarks";

/// Timestamp format for `generated_date`, local time to the second.
const GENERATED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Results version tag.
    pub version: String,
    /// Wall-clock build timestamp; excluded from equality by callers
    /// needing determinism.
    pub generated_date: String,
    /// Number of entries in `systems`; always equals the list length.
    pub total_systems: usize,
    /// Number of entries in `benchmarks`; always equals the list length.
    pub total_benchmarks: usize,
    /// Human-readable description.
    pub description: String,
}

/// One benchmark's summary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    /// Benchmark name.
    pub name: String,
    /// Scenario names, sorted ascending and deduplicated.
    pub scenarios: Vec<String>,
    /// Unit label shared by the benchmark's scenarios.
    pub unit: String,
}

/// The final serializable document consumed by the visualization page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    /// Document metadata.
    pub metadata: Metadata,
    /// Benchmarks, sorted ascending by name.
    pub benchmarks: Vec<BenchmarkEntry>,
    /// Systems, in source row order.
    pub systems: Vec<SystemRecord>,
}

/// Build the output document from the parse accumulators.
///
/// Benchmarks are emitted in ordinal name order with sorted scenario lists;
/// systems keep assembler discovery order.
pub fn build_document(summary: &BenchmarkSummary, systems: Vec<SystemRecord>) -> OutputDocument {
    let benchmarks: Vec<BenchmarkEntry> = summary
        .iter()
        .map(|(name, info)| BenchmarkEntry {
            name: name.clone(),
            scenarios: info.scenarios.iter().cloned().collect(),
            unit: info.unit.clone(),
        })
        .collect();

    let metadata = Metadata {
        version: VERSION_TAG.to_string(),
        generated_date: Local::now().format(GENERATED_DATE_FORMAT).to_string(),
        total_systems: systems.len(),
        total_benchmarks: benchmarks.len(),
        description: DESCRIPTION.to_string(),
    };

    OutputDocument {
        metadata,
        benchmarks,
        systems,
    }
}
