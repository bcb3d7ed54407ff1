// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Change detection between an incoming upstream record and its cached state.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::hash::content_hash;
use crate::payload::{FieldPath, UpstreamRecord};
use crate::record::{CachedRecord, ChangeSnapshot, ChangeType, Differences, FieldDiff};

/// Field paths compared when building the differences of an update.
pub const DEFAULT_DIFF_FIELDS: [&str; 7] = [
    "item_data.name",
    "item_data.description",
    "item_data.image_ids",
    "item_data.variations",
    "item_data.categories",
    "version",
    "updated_at",
];

/// Classifies incoming records as create, update or no-op.
///
/// The content hash decides whether anything changed. The field allowlist
/// only decides which paths are reported in the differences, so an update
/// may carry an empty differences map when the change falls outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDetector {
    fields: Vec<FieldPath>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        ChangeDetector {
            fields: DEFAULT_DIFF_FIELDS
                .iter()
                .filter_map(|p| FieldPath::parse(p).ok())
                .collect(),
        }
    }
}

impl ChangeDetector {
    /// Parses a list of dot-separated paths into a detector.
    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Result<Self> {
        let fields = paths
            .iter()
            .map(|p| FieldPath::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(ChangeDetector { fields })
    }

    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }

    /// Compares `incoming` against `cached` and returns a snapshot if it changed.
    pub fn detect(
        &self,
        incoming: &UpstreamRecord,
        cached: Option<&CachedRecord>,
        now: DateTime<Utc>,
    ) -> Option<ChangeSnapshot> {
        let Some(cached) = cached else {
            return Some(ChangeSnapshot {
                id: None,
                item_id: incoming.id.clone(),
                item_name: incoming.name().to_string(),
                change_type: ChangeType::Create,
                timestamp: now,
                before_data: None,
                after_data: Some(incoming.payload.clone()),
                differences: None,
                version_before: None,
                version_after: incoming.version,
            });
        };

        if content_hash(&incoming.payload) == cached.content_hash {
            return None;
        }

        Some(ChangeSnapshot {
            id: None,
            item_id: incoming.id.clone(),
            item_name: incoming.name().to_string(),
            change_type: ChangeType::Update,
            timestamp: now,
            before_data: Some(cached.payload.clone()),
            after_data: Some(incoming.payload.clone()),
            differences: Some(self.diff(&cached.payload, &incoming.payload)),
            version_before: cached.version,
            version_after: incoming.version,
        })
    }

    /// Field-by-field differences over the allowlist.
    pub fn diff(&self, before: &serde_json::Value, after: &serde_json::Value) -> Differences {
        let mut differences = Differences::new();
        for field in &self.fields {
            let old = field.resolve(before);
            let new = field.resolve(after);
            if old != new {
                differences.insert(
                    field.as_str().to_string(),
                    FieldDiff {
                        before: old.cloned(),
                        after: new.cloned(),
                    },
                );
            }
        }
        differences
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
