//! Rejects edits to read-only subtrees

use status_datastore::ChangeContext;

use crate::error::{Error, Result};

/// Vetoes changes whose path mentions a read-only marker.
///
/// Markers match as case-sensitive substrings anywhere in the path, key
/// values included: an interface named `board` is read-only too.
#[derive(Debug, Clone)]
pub struct ChangeValidator {
    selector: String,
    markers: Vec<String>,
}

impl ChangeValidator {
    pub fn new(module: &str, markers: Vec<String>) -> Self {
        Self {
            selector: format!("/{}:*", module),
            markers,
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Check every change under the module; the first read-only hit fails.
    ///
    /// Returns the number of changes evaluated.
    pub fn verify(&self, ctx: &ChangeContext) -> Result<usize> {
        let mut evaluated = 0;
        for change in ctx.changes_matching(&self.selector) {
            evaluated += 1;
            let path = change.path();
            if let Some(marker) = self.read_only_marker(path) {
                tracing::warn!(path, marker, transaction = %ctx.transaction, "Rejecting edit to read-only path");
                return Err(Error::ReadOnlyPath {
                    path: path.to_string(),
                });
            }
        }
        tracing::debug!(transaction = %ctx.transaction, evaluated, "Change set verified");
        Ok(evaluated)
    }

    fn read_only_marker(&self, path: &str) -> Option<&str> {
        self.markers
            .iter()
            .map(String::as_str)
            .find(|marker| path.contains(*marker))
    }
}
