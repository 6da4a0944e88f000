//! Input decoding for the results export.
//!
//! The export is tab-delimited text of unpredictable encoding (different
//! publication years have shipped UTF-8, UTF-16 and Windows-1252 variants).
//! Decoding tries a fixed ordered candidate list and uses the first encoding
//! that produces no malformed sequences.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::error::{ParseError, Result};

/// Candidate encodings, in preference order.
///
/// `decode` sniffs a BOM first, so a byte-order-marked UTF-16 file is
/// handled on the first attempt. Windows-1252 (a Latin-1 superset) accepts
/// any byte sequence and acts as the terminal fallback.
static ENCODING_CANDIDATES: &[&Encoding] = &[UTF_8, UTF_16LE, UTF_16BE, WINDOWS_1252];

/// Read a tab-delimited file into rows of cells.
///
/// Returns every physical row, header region and blank rows included: the
/// header layout and the 4-row block arithmetic are positional, so no row
/// may be dropped or merged. Rows may be ragged; callers are expected to
/// bounds-check their own cell access.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read and
/// [`ParseError::Encoding`] if no candidate encoding decodes it cleanly.
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes = fs::read(path)?;
    let text = decode_bytes(&bytes).ok_or_else(|| ParseError::Encoding {
        path: path.to_path_buf(),
    })?;
    Ok(split_rows(&text))
}

/// Decode raw bytes using the first candidate encoding that succeeds.
fn decode_bytes(bytes: &[u8]) -> Option<String> {
    for encoding in ENCODING_CANDIDATES {
        let (text, used, had_errors) = encoding.decode(bytes);
        if !had_errors {
            debug!(encoding = used.name(), "decoded input file");
            return Some(text.into_owned());
        }
    }
    None
}

/// Split decoded text into tab-delimited rows.
fn split_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}
