//! In-memory content store, for tests and embedding.

use std::collections::HashMap;

use crate::content::{
    section_for_slug, ContentError, ContentStore, MenuEntry, PageLookup, Version,
};

/// Content store built up front and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    versions: Vec<Version>,
    menus: HashMap<(String, String), Vec<MenuEntry>>,
    pages: HashMap<(String, String), (String, String)>,
    class_references: HashMap<String, serde_json::Value>,
    cheatsheets: HashMap<String, serde_json::Value>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, key: &str, label: &str) -> Self {
        self.versions.push(Version::new(key, label));
        self
    }

    pub fn with_menu(mut self, version: &str, resource: &str, menu: Vec<MenuEntry>) -> Self {
        self.menus
            .insert((version.to_string(), resource.to_string()), menu);
        self
    }

    pub fn with_page(mut self, version: &str, slug: &str, title: &str, source: &str) -> Self {
        self.pages.insert(
            (version.to_string(), slug.to_string()),
            (title.to_string(), source.to_string()),
        );
        self
    }

    pub fn with_class_reference(mut self, version: &str, data: serde_json::Value) -> Self {
        self.class_references.insert(version.to_string(), data);
        self
    }

    pub fn with_cheatsheet(mut self, version: &str, data: serde_json::Value) -> Self {
        self.cheatsheets.insert(version.to_string(), data);
        self
    }

    fn missing(version: &str, resource: &str) -> ContentError {
        ContentError::MissingResource {
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }
}

impl ContentStore for MemoryContentStore {
    fn versions(&self) -> Result<Vec<Version>, ContentError> {
        Ok(self.versions.clone())
    }

    fn menu(&self, version: &str, resource: &str) -> Result<Vec<MenuEntry>, ContentError> {
        self.menus
            .get(&(version.to_string(), resource.to_string()))
            .cloned()
            .ok_or_else(|| Self::missing(version, resource))
    }

    fn submenu(
        &self,
        version: &str,
        resource: &str,
        slug: &str,
    ) -> Result<Vec<MenuEntry>, ContentError> {
        let menu = self.menu(version, resource)?;
        Ok(section_for_slug(&menu, slug))
    }

    fn page(&self, version: &str, slug: &str) -> Result<PageLookup, ContentError> {
        Ok(self
            .pages
            .get(&(version.to_string(), slug.to_string()))
            .map(|(title, source)| PageLookup::from_parts(title.clone(), source.clone()))
            .unwrap_or(PageLookup::NotFound))
    }

    fn class_reference(&self, version: &str) -> Result<serde_json::Value, ContentError> {
        self.class_references
            .get(version)
            .cloned()
            .ok_or_else(|| Self::missing(version, "class_reference"))
    }

    fn cheatsheet(&self, version: &str) -> Result<serde_json::Value, ContentError> {
        self.cheatsheets
            .get(version)
            .cloned()
            .ok_or_else(|| Self::missing(version, "cheatsheet"))
    }
}
