//! Per-field blur state for one form session

use parking_lot::RwLock;
use std::collections::HashSet;
use tracing::trace;

/// Records which fields the user has left at least once.
///
/// Keys are compared case-insensitively. The tracker is meant to be shared
/// (behind an `Arc`) between a form and its blur-gated rules.
#[derive(Debug, Default)]
pub struct BlurTracker {
    blurred: RwLock<HashSet<String>>,
}

fn normalize(field: &str) -> String {
    field.to_lowercase()
}

impl BlurTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the field has been left since the last reset
    pub fn is_blurred(&self, field: &str) -> bool {
        self.blurred.read().contains(&normalize(field))
    }

    /// Mark the field as left. Idempotent.
    pub fn mark_blurred(&self, field: &str) {
        if self.blurred.write().insert(normalize(field)) {
            trace!(field, "field blurred");
        }
    }

    /// Re-entering a field revokes its blurred state. Idempotent.
    pub fn mark_focused(&self, field: &str) {
        if self.blurred.write().remove(&normalize(field)) {
            trace!(field, "field focused");
        }
    }

    /// Clear all state, or only the fields whose key starts with `prefix`.
    pub fn reset_form(&self, prefix: &str) {
        let mut blurred = self.blurred.write();
        if prefix.is_empty() {
            blurred.clear();
        } else {
            let prefix = normalize(prefix);
            blurred.retain(|key| !key.starts_with(&prefix));
        }
        trace!(prefix, remaining = blurred.len(), "blur state reset");
    }

    pub fn blurred_count(&self) -> usize {
        self.blurred.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blurred.read().is_empty()
    }
}
