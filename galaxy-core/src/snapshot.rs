//! Deep-copy strategies and snapshot validation.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::{CoreError, Document};

/// Produces an independent copy of a document for the history stacks.
pub trait Snapshotter {
    fn copy(&self, doc: &Document) -> Result<Document, CoreError>;

    fn name(&self) -> &str;
}

/// Copies through `Clone`. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneSnapshotter;

impl Snapshotter for CloneSnapshotter {
    fn copy(&self, doc: &Document) -> Result<Document, CoreError> {
        Ok(doc.clone())
    }

    fn name(&self) -> &str {
        "clone"
    }
}

/// Copies by serializing to JSON and parsing it back.
///
/// Non-finite coordinates serialize as `null` and then fail to parse, so a map
/// with a broken position cannot be captured.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotter;

impl Snapshotter for JsonSnapshotter {
    fn copy(&self, doc: &Document) -> Result<Document, CoreError> {
        let json =
            serde_json::to_string(doc).map_err(|e| CoreError::CopyFailed(e.to_string()))?;
        let copy: Document =
            serde_json::from_str(&json).map_err(|e| CoreError::CopyFailed(e.to_string()))?;
        debug!(systems = copy.len(), bytes = json.len(), "json snapshot taken");
        Ok(copy)
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Check that a stored snapshot can be restored as a live document.
pub fn validate_snapshot(doc: &Document) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(doc.len());
    for (index, system) in doc.iter().enumerate() {
        if system.key.is_empty() {
            warn!(index, "snapshot contains a system with an empty key");
            return Err(CoreError::EmptyKey { index });
        }
        if !seen.insert(&system.key) {
            warn!(key = %system.key, "snapshot contains a duplicate key");
            return Err(CoreError::DuplicateKey {
                key: system.key.clone(),
            });
        }
        if !system.has_finite_position() {
            warn!(key = %system.key, "snapshot contains a non-finite position");
            return Err(CoreError::NonFiniteCoordinate {
                key: system.key.clone(),
            });
        }
    }
    Ok(())
}
