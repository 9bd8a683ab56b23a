//! Filesystem-backed content store.
//!
//! # Layout
//! ```text
//! <root>/versions.yml                  key: label, in display order
//! <root>/<version>/menu_docs.yml       sequence of menu entries
//! <root>/<version>/class_reference.yml
//! <root>/<version>/cheatsheet.yml
//! <root>/<version>/pages/<slug>.html   optional `---` YAML front matter
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::content::{
    section_for_slug, ContentError, ContentStore, MenuEntry, PageLookup, Version,
};

const VERSIONS_FILE: &str = "versions.yml";
const CLASS_REFERENCE_FILE: &str = "class_reference.yml";
const CHEATSHEET_FILE: &str = "cheatsheet.yml";
const PAGES_DIR: &str = "pages";
const PAGE_EXTENSION: &str = "html";

/// Content store reading YAML and HTML fragments from a directory tree.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn version_dir(&self, version: &str) -> Option<PathBuf> {
        is_safe_component(version).then(|| self.root.join(version))
    }

    fn read_resource(&self, version: &str, resource: &str) -> Result<String, ContentError> {
        let missing = || ContentError::MissingResource {
            version: version.to_string(),
            resource: resource.to_string(),
        };
        if !is_safe_component(resource) {
            return Err(missing());
        }
        let path = self.version_dir(version).ok_or_else(missing)?.join(resource);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(missing()),
            Err(e) => Err(ContentError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    fn read_yaml<T: DeserializeOwned>(&self, version: &str, resource: &str) -> Result<T, ContentError> {
        let raw = self.read_resource(version, resource)?;
        serde_yaml::from_str(&raw).map_err(|e| ContentError::Parse {
            path: format!("{}/{}", version, resource),
            message: e.to_string(),
        })
    }
}

impl ContentStore for FsContentStore {
    fn versions(&self) -> Result<Vec<Version>, ContentError> {
        let path = self.root.join(VERSIONS_FILE);
        let raw = fs::read_to_string(&path).map_err(|e| ContentError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let mapping: serde_yaml::Mapping =
            serde_yaml::from_str(&raw).map_err(|e| ContentError::Parse {
                path: VERSIONS_FILE.to_string(),
                message: e.to_string(),
            })?;

        mapping
            .iter()
            .map(|(key, label)| match (key.as_str(), label.as_str()) {
                (Some(key), Some(label)) => Ok(Version::new(key, label)),
                _ => Err(ContentError::Parse {
                    path: VERSIONS_FILE.to_string(),
                    message: format!(
                        "version `{}: {}` must be quoted strings, e.g. \"3.10\": \"3.10\"",
                        yaml_text(key),
                        yaml_text(label)
                    ),
                }),
            })
            .collect()
    }

    fn menu(&self, version: &str, resource: &str) -> Result<Vec<MenuEntry>, ContentError> {
        self.read_yaml(version, resource)
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
        let Some(version_dir) = self.version_dir(version) else {
            return Ok(PageLookup::NotFound);
        };
        if !is_safe_slug(slug) {
            return Ok(PageLookup::NotFound);
        }

        let path = version_dir
            .join(PAGES_DIR)
            .join(format!("{}.{}", slug, PAGE_EXTENSION));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PageLookup::NotFound),
            Err(e) => {
                return Err(ContentError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        let (front, body) = split_front_matter(&raw);
        let front: FrontMatter = match front {
            Some(yaml) if !yaml.trim().is_empty() => {
                serde_yaml::from_str(yaml).map_err(|e| ContentError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            _ => FrontMatter::default(),
        };
        let title = front.title.unwrap_or_else(|| title_from_slug(slug));

        Ok(PageLookup::from_parts(title, body.to_string()))
    }

    fn class_reference(&self, version: &str) -> Result<serde_json::Value, ContentError> {
        self.read_yaml(version, CLASS_REFERENCE_FILE)
    }

    fn cheatsheet(&self, version: &str) -> Result<serde_json::Value, ContentError> {
        self.read_yaml(version, CHEATSHEET_FILE)
    }
}

/// Best-effort rendering of a YAML value for error messages.
fn yaml_text(value: &serde_yaml::Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_default()
}

fn is_safe_component(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.split('/').all(is_safe_component)
}

/// Split `---` delimited YAML front matter from the body.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---\n").or_else(|| raw.strip_prefix("---\r\n")) else {
        return (None, raw);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    (None, raw)
}

/// "templates/twig-primer" → "Twig primer"
fn title_from_slug(slug: &str) -> String {
    let last = slug.rsplit('/').next().unwrap_or(slug).replace(['-', '_'], " ");
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter() {
        let (front, body) = split_front_matter("---\ntitle: Hello\n---\n<p>Body</p>\n");
        assert_eq!(front, Some("title: Hello\n"));
        assert_eq!(body, "<p>Body</p>\n");

        let (front, body) = split_front_matter("<p>No front matter</p>");
        assert_eq!(front, None);
        assert_eq!(body, "<p>No front matter</p>");

        // Unterminated block is treated as body.
        let (front, _) = split_front_matter("---\ntitle: Broken\n<p>x</p>");
        assert_eq!(front, None);
    }

    #[test]
    fn test_store_reads_pages_and_versions() {
        let dir = tempfile::tempdir().unwrap();
        let pages = dir.path().join("3.0").join(PAGES_DIR);
        fs::create_dir_all(&pages).unwrap();
        fs::write(dir.path().join(VERSIONS_FILE), "\"3.0\": \"3.0\"\n\"2.2\": Legacy\n").unwrap();
        fs::write(pages.join("intro.html"), "---\n---\n<p>Intro</p>\n").unwrap();
        fs::write(pages.join("empty.html"), "---\ntitle: Empty\n---\n").unwrap();
        fs::write(pages.join("spaces.html"), "  \n").unwrap();

        let store = FsContentStore::new(dir.path());
        assert_eq!(
            store.versions().unwrap(),
            vec![Version::new("3.0", "3.0"), Version::new("2.2", "Legacy")]
        );
        assert_eq!(
            store.page("3.0", "intro").unwrap(),
            PageLookup::Found(crate::content::Page {
                title: "Intro".into(),
                source: "<p>Intro</p>\n".into(),
            })
        );
        assert_eq!(store.page("3.0", "empty").unwrap(), PageLookup::NotFound);
        assert!(matches!(store.page("3.0", "spaces").unwrap(), PageLookup::Found(_)));
        assert_eq!(store.page("3.0", "../versions").unwrap(), PageLookup::NotFound);
        assert!(matches!(
            store.menu("3.0", crate::content::DOCS_MENU),
            Err(ContentError::MissingResource { .. })
        ));
    }

    #[test]
    fn test_unquoted_version_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VERSIONS_FILE), "3.10: \"3.10\"\n").unwrap();

        let err = FsContentStore::new(dir.path()).versions().unwrap_err();
        match err {
            ContentError::Parse { path, message } => {
                assert_eq!(path, VERSIONS_FILE);
                assert!(message.contains("quoted"), "{}", message);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_title_from_slug() {
        assert_eq!(title_from_slug("templates/twig-primer"), "Twig primer");
        assert_eq!(title_from_slug("installation"), "Installation");
    }

    #[test]
    fn test_slug_safety() {
        assert!(is_safe_slug("templates/tags"));
        assert!(!is_safe_slug("../secrets"));
        assert!(!is_safe_slug("a//b"));
        assert!(!is_safe_slug("a\\b"));
        assert!(!is_safe_slug(""));
    }
}
