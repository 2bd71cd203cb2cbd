//! Batch splitting for ingestion payloads
//!
//! Upstream exporters deliver either one JSON document (an array of raw
//! records, or a single record) or newline-delimited JSON. Splitting
//! decides only the unit of work; per-record validation belongs to the
//! normalizer.

use serde_json::Value;
use thiserror::Error;

/// Framing failure: the payload contained no parseable raw record at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("No valid JSON objects found")]
    Empty,
}

/// Split a raw text payload into individual raw records
///
/// The whole payload is parsed as one JSON value first: an array yields
/// its elements, an object yields itself. When that parse fails, the
/// payload is read as newline-delimited JSON; blank lines and lines that
/// fail to parse are skipped silently.
///
/// Non-object records (a scalar array element, a scalar line) are kept:
/// they count as raw records here and reject at normalization, which is
/// not a framing concern. A payload yielding zero records is the only
/// error.
pub fn split_batch(payload: &str) -> Result<Vec<Value>, BatchError> {
    let mut items = Vec::new();

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(elements)) => items = elements,
        Ok(object @ Value::Object(_)) => items.push(object),
        // A whole payload parsing to a bare scalar frames nothing.
        Ok(_) => {}
        Err(_) => {
            for line in payload.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Ok(value) = serde_json::from_str::<Value>(line) {
                    items.push(value);
                }
            }
        }
    }

    if items.is_empty() {
        return Err(BatchError::Empty);
    }
    Ok(items)
}
