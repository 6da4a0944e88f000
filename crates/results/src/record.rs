//! Record assembly over the data region.
//!
//! Each submitted system occupies exactly 4 consecutive rows. The 4th row
//! carries the aggregate results and most identity fields; the other 3 rows
//! each hold one metadata count at a fixed offset. The offsets below are
//! positional coupling to the v5.1 export layout and must not drift.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::header::{cell, ColumnMapping};

/// Rows per system block.
pub const BLOCK_ROWS: usize = 4;

/// Column of the row-type marker cell, checked on the block's 4th row.
pub const MARKER_COL: usize = 14;

/// Substring identifying the aggregate-result row of a block.
pub const RESULT_ROW_MARKER: &str = "Avg. Result";

// Result-row (block row 3) metadata offsets.
const COL_PUBLIC_ID: usize = 0;
const COL_ORGANIZATION: usize = 1;
const COL_SYSTEM_NAME: usize = 3;
const COL_ACCELERATOR: usize = 5;

// Counts live on different physical rows than the result row.
const ACCELERATOR_COUNT_ROW: usize = 1;
const ACCELERATOR_COUNT_COL: usize = 6;
const NODE_COUNT_ROW: usize = 2;
const NODE_COUNT_COL: usize = 4;
const PROCESSOR_COUNT_ROW: usize = 0;
const PROCESSOR_COUNT_COL: usize = 12;

/// Sentinel for a blank accelerator cell.
const ACCELERATOR_UNKNOWN: &str = "N/A";

/// One submitted system's distilled results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Externally visible submission identifier, version-tag prefixed.
    pub public_id: String,
    /// Submitting organization.
    pub organization: String,
    /// System (hardware/software configuration) name.
    pub system_name: String,
    /// Accelerator model, or `"N/A"` when the cell was blank.
    pub accelerator: String,
    /// Accelerator count; `None` when the cell did not parse.
    pub num_accelerators: Option<f64>,
    /// Node count; `None` when the cell did not parse.
    pub num_nodes: Option<f64>,
    /// Processor count; `None` when the cell did not parse.
    pub num_processors: Option<f64>,
    /// benchmark → scenario → result value (`None` for empty or
    /// unparseable cells).
    pub results: BTreeMap<String, BTreeMap<String, Option<f64>>>,
}

/// Parse a numeric cell, tolerating thousands separators.
///
/// Empty input and any non-numeric remainder yield `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Assemble system records from the post-header rows.
///
/// Walks the rows with a cursor that advances by [`BLOCK_ROWS`] on a
/// matched block and by 1 otherwise. The one-row resynchronization skips
/// leading junk rows, but a single malformed block can desynchronize block
/// boundaries for everything after it; that linear-scan behavior is kept
/// deliberately.
pub fn assemble_records(rows: &[Vec<String>], columns: &ColumnMapping) -> Vec<SystemRecord> {
    let mut systems = Vec::new();
    let mut cursor = 0;

    while cursor + BLOCK_ROWS <= rows.len() {
        let window = &rows[cursor..cursor + BLOCK_ROWS];
        if !cell(window, BLOCK_ROWS - 1, MARKER_COL).contains(RESULT_ROW_MARKER) {
            cursor += 1;
            continue;
        }

        match parse_block(window, columns) {
            Some(system) => systems.push(system),
            None => debug!(row = cursor, "dropped incomplete system block"),
        }
        cursor += BLOCK_ROWS;
    }

    systems
}

/// Parse one 4-row block into a record, or `None` if it fails retention.
///
/// A block is retained only when all three identity fields are non-empty
/// and at least one mapped column holds a parseable value.
fn parse_block(window: &[Vec<String>], columns: &ColumnMapping) -> Option<SystemRecord> {
    let result_row = BLOCK_ROWS - 1;

    let public_id = cell(window, result_row, COL_PUBLIC_ID);
    let organization = cell(window, result_row, COL_ORGANIZATION);
    let system_name = cell(window, result_row, COL_SYSTEM_NAME);
    if public_id.is_empty() || organization.is_empty() || system_name.is_empty() {
        return None;
    }

    let accelerator = cell(window, result_row, COL_ACCELERATOR);

    let mut results: BTreeMap<String, BTreeMap<String, Option<f64>>> = BTreeMap::new();
    let mut has_results = false;
    for (&col, column) in columns {
        let value = parse_number(cell(window, result_row, col));
        has_results |= value.is_some();
        results
            .entry(column.benchmark.clone())
            .or_default()
            .insert(column.scenario.clone(), value);
    }
    if !has_results {
        return None;
    }

    Some(SystemRecord {
        public_id: public_id.to_string(),
        organization: organization.to_string(),
        system_name: system_name.to_string(),
        accelerator: if accelerator.is_empty() {
            ACCELERATOR_UNKNOWN.to_string()
        } else {
            accelerator.to_string()
        },
        num_accelerators: parse_number(cell(
            window,
            ACCELERATOR_COUNT_ROW,
            ACCELERATOR_COUNT_COL,
        )),
        num_nodes: parse_number(cell(window, NODE_COUNT_ROW, NODE_COUNT_COL)),
        num_processors: parse_number(cell(window, PROCESSOR_COUNT_ROW, PROCESSOR_COUNT_COL)),
        results,
    })
}
