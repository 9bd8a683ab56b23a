//! Version token recognition.
//!
//! # Design Decisions
//! - Exact, case-sensitive comparison; no normalization
//! - Both version keys and display labels are recognized
//! - `local` is always recognized, whatever the store reports
//! - Empty segments are never versions

use std::collections::HashSet;

use crate::content::{Version, LOCAL_VERSION};

/// Decides whether a path segment names a known documentation version.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    default_version: String,
    known: HashSet<String>,
}

impl VersionResolver {
    /// Build a resolver from the versions reported by the content store.
    pub fn new(default_version: impl Into<String>, versions: &[Version]) -> Self {
        let mut known: HashSet<String> = versions
            .iter()
            .flat_map(|v| [v.label.clone(), v.key.clone()])
            .collect();
        known.insert(LOCAL_VERSION.to_string());

        Self {
            default_version: default_version.into(),
            known,
        }
    }

    /// True if `segment` is a recognized version token.
    pub fn is_known(&self, segment: &str) -> bool {
        !segment.is_empty() && self.known.contains(segment)
    }

    /// Version that unversioned requests are redirected to.
    pub fn default_version(&self) -> &str {
        &self.default_version
    }
}
