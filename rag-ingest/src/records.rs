//! Record file parsing.
//!
//! The input is a line-delimited file where each line is a JSON array of
//! strings; the first element is the text to embed. Each line is decoded
//! independently, and a malformed line is fatal for the whole run.

use std::path::Path;

use tracing::debug;

use crate::errors::IngestError;

/// A raw input record: an ordered sequence of fields, text first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The record's fields in original order.
    pub fields: Vec<String>,
}

impl Record {
    /// The text to embed (the first field).
    pub fn text(&self) -> &str {
        &self.fields[0]
    }
}

/// Read all records from a line-delimited file, preserving order.
///
/// # Errors
///
/// Returns `IngestError::ParseError` with the 1-based line number for the
/// first malformed or empty line; no partial-line recovery is attempted.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, IngestError> {
    let contents = tokio::fs::read_to_string(path).await?;

    let mut records = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        let fields: Vec<String> = serde_json::from_str(line)
            .map_err(|e| IngestError::parse(i + 1, e.to_string()))?;

        if fields.is_empty() {
            return Err(IngestError::parse(i + 1, "record has no fields"));
        }

        records.push(Record { fields });
    }

    debug!(count = records.len(), path = %path.display(), "Records parsed");
    Ok(records)
}
