//! Route parsing.
//!
//! # Responsibilities
//! - Turn a request path into a typed `Route`
//! - Expose the version prefix used by fallback handling
//!
//! # Design Decisions
//! - Purely structural: no content lookups while parsing
//! - Path matching is case-sensitive
//! - First match wins, in the order of the table below
//!
//! ```text
//! /                             → Home
//! /tree/{version}.json          → Tree
//! /{version}/tree.json          → Tree
//! /{version}/class-reference    → ClassReference
//! /{version}/cheatsheet         → Cheatsheet
//! /{version}/{slug...}          → Page
//! ```

const TREE_PREFIX: &str = "tree";
const JSON_SUFFIX: &str = ".json";

/// A parsed request route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Tree { version: String },
    ClassReference { version: String },
    Cheatsheet { version: String },
    Page { version: String, slug: String },
}

impl Route {
    /// Parse a request path (without query string).
    pub fn parse(path: &str) -> Option<Route> {
        let rest = path.strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Route::Home);
        }

        let (first, tail) = rest.split_once('/')?;
        if first.is_empty() {
            return None;
        }

        if first == TREE_PREFIX {
            if let Some(version) = tail.strip_suffix(JSON_SUFFIX) {
                if !version.is_empty() && !version.contains('/') {
                    return Some(Route::Tree {
                        version: version.to_string(),
                    });
                }
            }
        }

        let version = first.to_string();
        match tail {
            "" => None,
            "tree.json" => Some(Route::Tree { version }),
            "class-reference" => Some(Route::ClassReference { version }),
            "cheatsheet" => Some(Route::Cheatsheet { version }),
            slug => Some(Route::Page {
                version,
                slug: slug.to_string(),
            }),
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Tree { .. } => "tree",
            Route::ClassReference { .. } => "class_reference",
            Route::Cheatsheet { .. } => "cheatsheet",
            Route::Page { .. } => "page",
        }
    }
}

/// First segment of a request path: `/3.0/foo` → `3.0`, `/` → ``.
pub fn version_prefix(path: &str) -> &str {
    let rest = path.strip_prefix('/').unwrap_or(path);
    rest.split('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(version: &str, slug: &str) -> Route {
        Route::Page {
            version: version.into(),
            slug: slug.into(),
        }
    }

    #[test]
    fn test_parse_route_shapes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(
            Route::parse("/tree/3.0.json"),
            Some(Route::Tree { version: "3.0".into() })
        );
        assert_eq!(
            Route::parse("/3.0/tree.json"),
            Some(Route::Tree { version: "3.0".into() })
        );
        assert_eq!(
            Route::parse("/3.0/class-reference"),
            Some(Route::ClassReference { version: "3.0".into() })
        );
        assert_eq!(
            Route::parse("/3.0/cheatsheet"),
            Some(Route::Cheatsheet { version: "3.0".into() })
        );
        assert_eq!(Route::parse("/3.0/installation"), Some(page("3.0", "installation")));
    }

    #[test]
    fn test_slug_may_contain_slashes() {
        assert_eq!(
            Route::parse("/3.0/templates/twig-primer"),
            Some(page("3.0", "templates/twig-primer"))
        );
        // Only an exact `cheatsheet` tail is the cheatsheet route.
        assert_eq!(
            Route::parse("/3.0/cheatsheet/extra"),
            Some(page("3.0", "cheatsheet/extra"))
        );
    }

    #[test]
    fn test_tree_prefix_without_json_is_a_page() {
        assert_eq!(Route::parse("/tree/foo"), Some(page("tree", "foo")));
        assert_eq!(Route::parse("/tree/a/b.json"), Some(page("tree", "a/b.json")));
        assert_eq!(Route::parse("/tree/.json"), Some(page("tree", ".json")));
    }

    #[test]
    fn test_unroutable_paths() {
        assert_eq!(Route::parse("/cheatsheet"), None);
        assert_eq!(Route::parse("/3.0"), None);
        assert_eq!(Route::parse("/3.0/"), None);
        assert_eq!(Route::parse("//foo"), None);
        assert_eq!(Route::parse("relative/path"), None);
    }

    #[test]
    fn test_version_prefix() {
        assert_eq!(version_prefix("/3.0/cheatsheet"), "3.0");
        assert_eq!(version_prefix("/cheatsheet"), "cheatsheet");
        assert_eq!(version_prefix("/_profiler/abc"), "_profiler");
        assert_eq!(version_prefix("/"), "");
        assert_eq!(version_prefix(""), "");
    }
}
