//! Content store subsystem.
//!
//! # Data Flow
//! ```text
//! versions.yml            → versions()        → Vec<Version>
//! <version>/menu_docs.yml → menu()/submenu()  → Vec<MenuEntry>
//!                         → json_menu()       → serde_json::Value
//! <version>/pages/<slug>  → page()            → PageLookup
//! <version>/*.yml         → class_reference() / cheatsheet()
//! ```
//!
//! # Design Decisions
//! - The store is read fresh on every call; no caching at this layer
//! - A page with empty source is reported as `PageLookup::NotFound`
//! - Missing menu or data resources are errors, missing pages are not

pub mod fs;
pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fs::FsContentStore;
pub use memory::MemoryContentStore;

/// Synthetic version that is valid in every deployment.
pub const LOCAL_VERSION: &str = "local";

/// A documentation release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Identifier used in URLs and on disk (e.g. "3.0").
    pub key: String,

    /// Display label for version switchers.
    pub label: String,
}

impl Version {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// The `local` development version.
    pub fn local() -> Self {
        Self::new(LOCAL_VERSION, LOCAL_VERSION)
    }
}

/// One node of a navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub title: String,

    /// Page slug this entry links to. Section headers may have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    /// True if this entry or any descendant links to `slug`.
    pub fn contains_slug(&self, slug: &str) -> bool {
        self.slug.as_deref() == Some(slug) || self.children.iter().any(|c| c.contains_slug(slug))
    }
}

/// A resolved documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,

    /// Pre-rendered HTML body.
    pub source: String,
}

/// Outcome of a page lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLookup {
    Found(Page),
    NotFound,
}

impl PageLookup {
    /// Build a lookup result, treating empty source as absent.
    ///
    /// Only a zero-length source counts as empty; whitespace is content.
    pub fn from_parts(title: String, source: String) -> Self {
        if source.is_empty() {
            PageLookup::NotFound
        } else {
            PageLookup::Found(Page { title, source })
        }
    }
}

/// Errors raised by a content store.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content resource `{resource}` is missing for version `{version}`")]
    MissingResource { version: String, resource: String },

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{path}`: {message}")]
    Parse { path: String, message: String },
}

/// Read access to versioned documentation content.
///
/// Every method takes the version (and slug where relevant) explicitly, so
/// a single store instance can serve all requests concurrently.
pub trait ContentStore: Send + Sync {
    /// All known versions, in display order.
    fn versions(&self) -> Result<Vec<Version>, ContentError>;

    /// Navigation tree for `version` from the named menu resource.
    fn menu(&self, version: &str, resource: &str) -> Result<Vec<MenuEntry>, ContentError>;

    /// The section of the named menu resource that contains `slug`.
    fn submenu(
        &self,
        version: &str,
        resource: &str,
        slug: &str,
    ) -> Result<Vec<MenuEntry>, ContentError>;

    /// JSON form of the named menu resource.
    fn json_menu(&self, version: &str, resource: &str) -> Result<serde_json::Value, ContentError> {
        let menu = self.menu(version, resource)?;
        serde_json::to_value(menu).map_err(|e| ContentError::Parse {
            path: format!("{}/{}", version, resource),
            message: e.to_string(),
        })
    }

    /// Title and source of the page at (`version`, `slug`).
    fn page(&self, version: &str, slug: &str) -> Result<PageLookup, ContentError>;

    fn class_reference(&self, version: &str) -> Result<serde_json::Value, ContentError>;

    fn cheatsheet(&self, version: &str) -> Result<serde_json::Value, ContentError>;
}

/// Default navigation menu resource.
pub const DOCS_MENU: &str = "menu_docs.yml";

/// Top-level section of `menu` containing `slug`, as a flat list of its children.
pub fn section_for_slug(menu: &[MenuEntry], slug: &str) -> Vec<MenuEntry> {
    menu.iter()
        .find(|entry| entry.contains_slug(slug))
        .map(|entry| entry.children.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, slug: Option<&str>, children: Vec<MenuEntry>) -> MenuEntry {
        MenuEntry {
            title: title.into(),
            slug: slug.map(String::from),
            children,
        }
    }

    #[test]
    fn test_empty_source_is_not_found() {
        assert_eq!(PageLookup::from_parts("T".into(), String::new()), PageLookup::NotFound);
        assert!(matches!(
            PageLookup::from_parts("T".into(), "   \n".into()),
            PageLookup::Found(_)
        ));
        assert!(matches!(
            PageLookup::from_parts("T".into(), "<p>x</p>".into()),
            PageLookup::Found(_)
        ));
    }

    #[test]
    fn test_section_for_slug() {
        let menu = vec![
            entry(
                "Getting started",
                None,
                vec![entry("Installation", Some("installation"), vec![])],
            ),
            entry(
                "Templates",
                None,
                vec![
                    entry("Basics", Some("templates/basics"), vec![]),
                    entry("Tags", Some("templates/tags"), vec![]),
                ],
            ),
        ];

        let section = section_for_slug(&menu, "templates/tags");
        assert_eq!(section.len(), 2);
        assert_eq!(section[0].title, "Basics");

        assert!(section_for_slug(&menu, "missing").is_empty());
    }
}
