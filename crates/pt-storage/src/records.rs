//! Loading raw review exports
//!
//! Accepts either a bare JSON array of records or an object carrying a
//! `reviews` array, the shape returned by the note and blog endpoints.

use pt_core::error::{PeerThreadError, Result};
use pt_core::review::ReviewRecord;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordPayload {
    Bare(Vec<ReviewRecord>),
    Wrapped { reviews: Vec<ReviewRecord> },
}

/// Parse review records from JSON text
pub fn read_records_from_str(json: &str) -> Result<Vec<ReviewRecord>> {
    let payload: RecordPayload = serde_json::from_str(json).map_err(|e| {
        PeerThreadError::Validation(format!(
            "Expected a JSON array of reviews or an object with a \"reviews\" array: {}",
            e
        ))
    })?;

    Ok(match payload {
        RecordPayload::Bare(records) => records,
        RecordPayload::Wrapped { reviews } => reviews,
    })
}

/// Read review records from a JSON file
pub fn read_records(path: &Path) -> Result<Vec<ReviewRecord>> {
    let content = fs::read_to_string(path).map_err(|e| {
        PeerThreadError::Io(e).with_context(format!("Failed to read {}", path.display()))
    })?;
    let records = read_records_from_str(&content)?;
    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
